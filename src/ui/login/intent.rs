use crate::presenter::LoginState;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum LoginIntent {
    /// Observer registered with a fresh presenter.
    PresenterReady,
    /// Factory failed.
    InitFailed { reason: String },
    /// Binding was torn down.
    PresenterClosed,
    /// A resolved snapshot arrived. Applied as-is, last write wins.
    Apply(LoginState),
    HostInput(char),
    HostBackspace,
    /// Dismiss the error line. Presenter state is untouched.
    ClearError,
}

impl Intent for LoginIntent {}
