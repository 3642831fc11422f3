use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::bridge::UiDispatcher;
use crate::config::ConfigStore;
use crate::error::{ErrorCategory, ErrorRegistry};
use crate::presenter::PresenterLibrary;
use crate::ui::events::AppEvent;
use crate::ui::input::{handle_key, InputCommand};
use crate::view::{LoginView, UserAction};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Terminal-side application state around the login view.
pub struct App {
    config: ConfigStore,
    view: LoginView,
    should_quit: bool,
    ticks: usize,
}

impl App {
    pub fn new(
        config: ConfigStore,
        library: Arc<dyn PresenterLibrary>,
        dispatcher: UiDispatcher,
        errors: ErrorRegistry,
    ) -> Self {
        let host = config.get().ui.default_host;
        let mut view = LoginView::construct_with_host(library, dispatcher, errors, host);
        if !view.state().is_init_failed() {
            if let Err(err) = view.connect() {
                tracing::warn!(error = %err, "initial connect failed");
            }
        }
        Self {
            config,
            view,
            should_quit: false,
            ticks: 0,
        }
    }

    pub fn view(&self) -> &LoginView {
        &self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Tick => self.ticks = self.ticks.wrapping_add(1),
            AppEvent::Resize(_, _) => {}
            AppEvent::Presenter(event) => self.view.on_presenter_event(event),
            AppEvent::Shutdown => self.request_quit(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match handle_key(key, self.view.screen(), self.view.state()) {
            Some(InputCommand::Quit) => self.request_quit(),
            Some(InputCommand::Action(UserAction::Retry)) => self.retry(),
            Some(InputCommand::Action(action)) => self.view.on_user_action(action),
            None => {}
        }
    }

    /// Reload config, then rebuild the presenter with it.
    fn retry(&mut self) {
        if !self.view.state().is_init_failed() {
            return;
        }
        if let Err(err) = self.config.reload() {
            tracing::warn!(error = %err, "config reload failed, retrying with current config");
            self.view
                .errors()
                .record(ErrorCategory::Config, err.to_string());
        }
        let connected = self.view.retry();
        tracing::info!(connected, "retry finished");
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER[self.ticks % SPINNER.len()]
    }

    /// Tear the view down ahead of terminal restore.
    pub fn close(&mut self) {
        self.view.teardown();
    }
}
