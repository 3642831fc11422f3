//! Login screen feature module.
//!
//! - `state.rs` - presenter status plus the mirrored snapshot and host field
//! - `intent.rs` - binding events, snapshots and host edits
//! - `reducer.rs` - state transitions (pure, no side effects)

mod intent;
mod reducer;
mod state;

pub use intent::LoginIntent;
pub use reducer::LoginReducer;
pub use state::{LoginScreenState, PresenterStatus};
