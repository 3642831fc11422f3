//! Login state snapshots and the opaque tokens that refer to them.

use std::fmt;

use uuid::Uuid;

/// Identity of one presenter instance.
///
/// Minted fresh for every presenter the library creates, so a token issued by
/// one presenter never resolves against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresenterId(Uuid);

impl PresenterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PresenterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PresenterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "presenter-{}", &simple[..8])
    }
}

/// Opaque reference to a published [`LoginState`].
///
/// The view cannot read anything out of a token. It has to hand the token
/// back to the presenter that issued it through
/// [`PresenterHandle::unwrap_state`](crate::presenter::PresenterHandle::unwrap_state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateToken {
    presenter: PresenterId,
    sequence: u64,
}

impl StateToken {
    pub(crate) fn new(presenter: PresenterId, sequence: u64) -> Self {
        Self {
            presenter,
            sequence,
        }
    }

    pub(crate) fn presenter(&self) -> PresenterId {
        self.presenter
    }

    pub(crate) fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.presenter, self.sequence)
    }
}

/// Phase of the presenter's login state machine.
///
/// `Idle → Loading → {Authenticated, Failed}`; a new submit moves `Failed`
/// back to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    Loading,
    Authenticated,
    Failed,
}

impl LoginPhase {
    pub fn label(&self) -> &'static str {
        match self {
            LoginPhase::Idle => "idle",
            LoginPhase::Loading => "signing in",
            LoginPhase::Authenticated => "signed in",
            LoginPhase::Failed => "failed",
        }
    }
}

/// Read-only snapshot of the presenter's login state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginState {
    phase: LoginPhase,
    loading: bool,
    error: Option<String>,
    account: Option<String>,
}

impl LoginState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn in_progress() -> Self {
        Self {
            phase: LoginPhase::Loading,
            loading: true,
            error: None,
            account: None,
        }
    }

    pub fn authenticated(account: impl Into<String>) -> Self {
        Self {
            phase: LoginPhase::Authenticated,
            loading: false,
            error: None,
            account: Some(account.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            phase: LoginPhase::Failed,
            loading: false,
            error: Some(message.into()),
            account: None,
        }
    }

    pub fn phase(&self) -> LoginPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }
}
