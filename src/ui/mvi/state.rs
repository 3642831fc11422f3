//! Base trait for UI state in the MVI layer.

/// Marker trait for screen state.
///
/// `Default` is required so a reducer can be driven through
/// `std::mem::take` without cloning the current value.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
