use thiserror::Error;

use crate::presenter::state::StateToken;

/// Why a token no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// Token was issued by a different presenter instance.
    ForeignPresenter,
    /// Snapshot fell out of the retention window.
    Evicted,
    /// Presenter was closed and all of its snapshots released.
    Disposed,
    /// Sequence number was never handed out.
    NotYetIssued,
}

impl std::fmt::Display for StaleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            StaleReason::ForeignPresenter => "issued by another presenter",
            StaleReason::Evicted => "evicted from retention window",
            StaleReason::Disposed => "presenter disposed",
            StaleReason::NotYetIssued => "never issued",
        };
        f.write_str(text)
    }
}

/// Errors crossing the presenter boundary.
#[derive(Debug, Clone, Error)]
pub enum PresenterError {
    /// Factory could not produce a presenter.
    #[error("Presenter initialization failed: {reason}")]
    Initialization { reason: String },

    /// Token cannot be resolved to a snapshot.
    #[error("State token {token} is stale: {reason}")]
    StaleToken {
        token: StateToken,
        reason: StaleReason,
    },

    /// Operation requires a presenter but none was created.
    #[error("No presenter has been created")]
    NotCreated,

    /// Presenter was already closed.
    #[error("Presenter is closed")]
    Closed,
}

impl PresenterError {
    pub fn initialization(reason: impl Into<String>) -> Self {
        Self::Initialization {
            reason: reason.into(),
        }
    }

    pub fn stale(token: StateToken, reason: StaleReason) -> Self {
        Self::StaleToken { token, reason }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, PresenterError::StaleToken { .. })
    }
}
