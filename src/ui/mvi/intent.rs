//! Base trait for intents in the MVI layer.

/// Marker trait for intent objects.
///
/// Intents are either key presses the user made or presenter snapshots that
/// reached the UI thread. Reducers turn them into new states.
pub trait Intent: Send + 'static {}
