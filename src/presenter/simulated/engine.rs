use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::{LoginOutcome, PresenterSettings};
use crate::presenter::action::{callback_code, LoginAction};
use crate::presenter::handle::NavigationCallback;
use crate::presenter::simulated::stream::StateStream;
use crate::presenter::state::{LoginState, PresenterId};

pub const HOST_REQUIRED: &str = "Host is required.";
pub const MISSING_CODE: &str = "Callback URL has no code.";

/// What the engine needs out of the presenter settings.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub login_delay: Duration,
    pub outcome: LoginOutcome,
    pub failure_message: String,
}

impl From<&PresenterSettings> for EngineSettings {
    fn from(settings: &PresenterSettings) -> Self {
        Self {
            login_delay: Duration::from_millis(settings.login_delay_ms),
            outcome: settings.outcome,
            failure_message: settings.failure_message.clone(),
        }
    }
}

/// Processes actions one at a time until the action channel closes or the
/// task is aborted.
pub async fn run(
    presenter: PresenterId,
    mut actions: mpsc::UnboundedReceiver<LoginAction>,
    stream: Arc<StateStream>,
    to_home: NavigationCallback,
    settings: EngineSettings,
) {
    while let Some(action) = actions.recv().await {
        tracing::debug!(%presenter, action = action.name(), "presenter action");
        match action {
            LoginAction::Submit { host } => {
                let host = host.trim().to_string();
                if host.is_empty() {
                    stream.emit(LoginState::failed(HOST_REQUIRED));
                    continue;
                }
                sign_in(&stream, &to_home, &settings, &host).await;
            }
            LoginAction::Resume { callback_url } => {
                let Some(code) = callback_code(&callback_url) else {
                    stream.emit(LoginState::failed(MISSING_CODE));
                    continue;
                };
                tracing::debug!(%presenter, code_len = code.len(), "resuming from callback");
                let host = callback_host(&callback_url).unwrap_or("callback").to_string();
                stream.emit(LoginState::in_progress());
                tokio::time::sleep(settings.login_delay).await;
                complete(&stream, &to_home, &host);
            }
        }
    }
    tracing::debug!(%presenter, "presenter engine stopped");
}

async fn sign_in(
    stream: &StateStream,
    to_home: &NavigationCallback,
    settings: &EngineSettings,
    host: &str,
) {
    stream.emit(LoginState::in_progress());
    tokio::time::sleep(settings.login_delay).await;
    match settings.outcome {
        LoginOutcome::Authenticated => complete(stream, to_home, host),
        LoginOutcome::Failed => stream.emit(LoginState::failed(settings.failure_message.clone())),
    }
}

fn complete(stream: &StateStream, to_home: &NavigationCallback, host: &str) {
    stream.emit(LoginState::authenticated(format!("@demo@{host}")));
    to_home();
}

fn callback_host(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let host = rest.split(['/', '?', '#']).next()?;
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
