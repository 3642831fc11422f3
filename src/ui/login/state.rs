//! State for the login screen.

use crate::presenter::LoginPhase;
use crate::ui::mvi::UiState;

/// Where the view's presenter binding stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PresenterStatus {
    /// Presenter created, observer not registered yet.
    #[default]
    Starting,
    /// Observer registered; snapshots are flowing.
    Ready,
    /// Factory refused to create a presenter. Retry is possible.
    InitFailed { reason: String },
    /// Binding torn down.
    Closed,
}

impl PresenterStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PresenterStatus::Starting => "starting",
            PresenterStatus::Ready => "ready",
            PresenterStatus::InitFailed { .. } => "unavailable",
            PresenterStatus::Closed => "closed",
        }
    }
}

/// Everything the login screen renders.
///
/// `phase`, `loading`, `error` and `account` mirror the last applied
/// presenter snapshot; `host` is edited locally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginScreenState {
    pub status: PresenterStatus,
    pub phase: LoginPhase,
    pub loading: bool,
    pub error: Option<String>,
    pub account: Option<String>,
    pub host: String,
    /// Number of snapshots applied so far.
    pub applied: u64,
}

impl UiState for LoginScreenState {}

impl LoginScreenState {
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == PresenterStatus::Ready
    }

    pub fn is_init_failed(&self) -> bool {
        matches!(self.status, PresenterStatus::InitFailed { .. })
    }

    /// Host field accepts edits and a submit.
    pub fn accepts_input(&self) -> bool {
        self.is_ready() && !self.loading
    }
}
