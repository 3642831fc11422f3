//! Presenter boundary: handles, tokens and the snapshot registry.

mod action;
mod error;
mod handle;
mod slots;
mod state;

pub mod simulated;

pub use action::{callback_code, LoginAction};
pub use error::{PresenterError, StaleReason};
pub use handle::{
    ConnectOutcome, LoginPresenter, NavigationCallback, PresenterHandle, PresenterLibrary,
    StateCallback,
};
pub use slots::{SnapshotSlots, DEFAULT_RETAINED_STATES};
pub use state::{LoginPhase, LoginState, PresenterId, StateToken};
