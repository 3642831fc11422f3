//! Login view: the presenter owner.
//!
//! Lives on the UI thread. Creates one [`PresenterBinding`] per construction
//! or retry, relays user actions into it and applies the presenter events the
//! bridge marshaled back.
//!
//! ```text
//! construct ──→ create_presenter(to_home) ──→ connect(state_callback)
//!                      │ Err                         │
//!                      └──→ InitFailed ──retry──→ construct
//!
//! presenter thread ──→ bridge ──→ AppEvent::Presenter ──→ on_presenter_event
//! ```

mod binding;

use std::sync::Arc;

use crate::bridge::{BindingId, PresenterEvent, UiDispatcher};
use crate::error::{ErrorCategory, ErrorRegistry};
use crate::presenter::{
    ConnectOutcome, LoginAction, PresenterError, PresenterId, PresenterLibrary, StateToken,
};
use crate::ui::login::{LoginIntent, LoginReducer, LoginScreenState};
use crate::ui::mvi::Reducer;
use crate::ui::nav::{NavIntent, NavReducer, ScreenState};

pub use binding::PresenterBinding;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// User intents the terminal maps keys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    HostInput(char),
    HostBackspace,
    Submit,
    ClearError,
    Retry,
}

pub struct LoginView {
    library: Arc<dyn PresenterLibrary>,
    dispatcher: UiDispatcher,
    errors: ErrorRegistry,
    binding: Option<PresenterBinding>,
    next_binding: u64,
    login: LoginScreenState,
    screen: ScreenState,
    navigations: usize,
}

impl LoginView {
    /// Create the view and its first presenter.
    ///
    /// A factory failure is not an error here: the view comes up in
    /// `InitFailed` and can be retried.
    pub fn construct(
        library: Arc<dyn PresenterLibrary>,
        dispatcher: UiDispatcher,
        errors: ErrorRegistry,
    ) -> Self {
        Self::construct_with_host(library, dispatcher, errors, String::new())
    }

    pub fn construct_with_host(
        library: Arc<dyn PresenterLibrary>,
        dispatcher: UiDispatcher,
        errors: ErrorRegistry,
        host: impl Into<String>,
    ) -> Self {
        let mut view = Self {
            library,
            dispatcher,
            errors,
            binding: None,
            next_binding: 0,
            login: LoginScreenState::with_host(host),
            screen: ScreenState::default(),
            navigations: 0,
        };
        view.bind();
        view
    }

    fn bind(&mut self) {
        self.next_binding += 1;
        let id = BindingId(self.next_binding);
        match PresenterBinding::create(
            self.library.as_ref(),
            id,
            self.dispatcher.clone(),
            self.errors.clone(),
        ) {
            Ok(binding) => {
                tracing::info!(binding = %id, presenter = %binding.presenter(), "presenter bound");
                self.binding = Some(binding);
            }
            Err(err) => {
                tracing::warn!(binding = %id, error = %err, "presenter creation failed");
                self.errors
                    .record(ErrorCategory::Initialization, err.to_string());
                let reason = match err {
                    PresenterError::Initialization { reason } => reason,
                    other => other.to_string(),
                };
                dispatch_mvi!(self, login, LoginReducer, LoginIntent::InitFailed { reason });
            }
        }
    }

    /// Register the state observer with the current presenter.
    ///
    /// Connecting again replaces the previous observer.
    pub fn connect(&mut self) -> Result<ConnectOutcome, PresenterError> {
        let binding = self.binding.as_mut().ok_or(PresenterError::NotCreated)?;
        match binding.connect() {
            Ok(outcome) => {
                tracing::debug!(binding = %binding.id(), ?outcome, "state observer registered");
                dispatch_mvi!(self, login, LoginReducer, LoginIntent::PresenterReady);
                Ok(outcome)
            }
            Err(err) => {
                self.errors.record(ErrorCategory::Presenter, err.to_string());
                Err(err)
            }
        }
    }

    pub fn on_user_action(&mut self, action: UserAction) {
        match action {
            UserAction::HostInput(ch) => {
                dispatch_mvi!(self, login, LoginReducer, LoginIntent::HostInput(ch));
            }
            UserAction::HostBackspace => {
                dispatch_mvi!(self, login, LoginReducer, LoginIntent::HostBackspace);
            }
            UserAction::ClearError => {
                dispatch_mvi!(self, login, LoginReducer, LoginIntent::ClearError);
            }
            UserAction::Submit => self.submit(),
            UserAction::Retry => {
                self.retry();
            }
        }
    }

    fn submit(&mut self) {
        if self.login.loading {
            tracing::debug!("submit ignored while loading");
            return;
        }
        let Some(binding) = self.binding.as_ref() else {
            tracing::debug!("submit ignored without presenter");
            return;
        };
        let action = LoginAction::from_input(&self.login.host);
        tracing::info!(binding = %binding.id(), action = action.name(), "dispatching");
        if let Err(err) = binding.dispatch(action) {
            tracing::warn!(binding = %binding.id(), error = %err, "dispatch rejected");
            self.errors.record(ErrorCategory::Presenter, err.to_string());
        }
    }

    pub fn on_presenter_event(&mut self, event: PresenterEvent) {
        match event {
            PresenterEvent::StateChanged { binding, token } => {
                self.on_state_changed(binding, token)
            }
            PresenterEvent::NavigateHome { binding } => self.on_navigate_home(binding),
        }
    }

    /// Resolve `token` and apply the snapshot.
    pub fn on_state_changed(&mut self, binding: BindingId, token: StateToken) {
        let Some(current) = self.live_binding(binding, "state") else {
            return;
        };
        match current.unwrap_state(&token) {
            Ok(state) => {
                tracing::trace!(%binding, %token, loading = state.is_loading(), "snapshot applied");
                dispatch_mvi!(self, login, LoginReducer, LoginIntent::Apply(state));
            }
            Err(err) if err.is_stale() => {
                tracing::debug!(%binding, error = %err, "stale token ignored");
                self.errors.record(ErrorCategory::StaleToken, err.to_string());
            }
            Err(err) => {
                tracing::warn!(%binding, error = %err, "token could not be resolved");
                self.errors.record(ErrorCategory::Presenter, err.to_string());
            }
        }
    }

    pub fn on_navigate_home(&mut self, binding: BindingId) {
        if self.live_binding(binding, "navigation").is_none() {
            return;
        }
        if self.screen == ScreenState::Home {
            tracing::debug!(%binding, "already home");
            return;
        }
        dispatch_mvi!(self, screen, NavReducer, NavIntent::ToHome);
        self.navigations += 1;
        tracing::info!(%binding, "navigated home");
    }

    fn live_binding(&self, binding: BindingId, kind: &'static str) -> Option<&PresenterBinding> {
        match self.binding.as_ref() {
            Some(current) if current.id() == binding && current.is_alive() => Some(current),
            _ => {
                tracing::debug!(%binding, kind, "event from inactive binding dropped");
                self.errors.record(
                    ErrorCategory::Reentrancy,
                    format!("{kind} event from inactive {binding}"),
                );
                None
            }
        }
    }

    /// Rebuild and reconnect the presenter after a factory failure.
    ///
    /// Returns `true` when a new presenter was connected.
    pub fn retry(&mut self) -> bool {
        if !self.login.is_init_failed() {
            tracing::debug!(status = self.login.status.label(), "retry ignored");
            return false;
        }
        self.binding = None;
        self.bind();
        if self.binding.is_none() {
            return false;
        }
        self.connect().is_ok()
    }

    /// Invalidate callbacks and close the presenter. Idempotent.
    pub fn teardown(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };
        tracing::info!(binding = %binding.id(), "tearing down view");
        drop(binding);
        dispatch_mvi!(self, login, LoginReducer, LoginIntent::PresenterClosed);
    }

    pub fn state(&self) -> &LoginScreenState {
        &self.login
    }

    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    /// Completed Login → Home transitions.
    pub fn navigations(&self) -> usize {
        self.navigations
    }

    pub fn is_ready(&self) -> bool {
        self.login.is_ready()
    }

    pub fn binding_id(&self) -> Option<BindingId> {
        self.binding.as_ref().map(PresenterBinding::id)
    }

    pub fn presenter_id(&self) -> Option<PresenterId> {
        self.binding.as_ref().map(PresenterBinding::presenter)
    }

    pub fn errors(&self) -> &ErrorRegistry {
        &self.errors
    }
}

impl Drop for LoginView {
    fn drop(&mut self) {
        self.teardown();
    }
}
