//! Shared test utilities: a scripted presenter library and queue helpers.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use login_shell::bridge::UiDispatcher;
use login_shell::error::ErrorRegistry;
use login_shell::presenter::{
    ConnectOutcome, LoginAction, LoginPresenter, LoginState, NavigationCallback, PresenterError,
    PresenterHandle, PresenterId, PresenterLibrary, SnapshotSlots, StateCallback, StateToken,
};
use login_shell::ui::events::AppEvent;
use login_shell::view::LoginView;
use parking_lot::Mutex;

/// Presenter library driven by the test instead of by real work.
///
/// Presenters it creates keep every callback they were given, even after
/// close, so tests can fire them late the way a misbehaving library would.
pub struct ScriptedLibrary {
    retained_states: usize,
    fail_remaining: AtomicUsize,
    presenters: Mutex<Vec<Arc<ScriptedShared>>>,
}

impl ScriptedLibrary {
    pub fn new() -> Arc<Self> {
        Self::with_retention(16)
    }

    pub fn with_retention(retained_states: usize) -> Arc<Self> {
        Arc::new(Self {
            retained_states,
            fail_remaining: AtomicUsize::new(0),
            presenters: Mutex::new(Vec::new()),
        })
    }

    /// Make the next `count` factory calls fail.
    pub fn fail_next(&self, count: usize) {
        self.fail_remaining.store(count, Ordering::SeqCst);
    }

    pub fn created(&self) -> usize {
        self.presenters.lock().len()
    }

    pub fn latest(&self) -> Arc<ScriptedShared> {
        self.presenters
            .lock()
            .last()
            .cloned()
            .expect("no presenter created")
    }
}

impl PresenterLibrary for ScriptedLibrary {
    fn create_presenter(
        &self,
        to_home: NavigationCallback,
    ) -> Result<PresenterHandle, PresenterError> {
        let failed = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(PresenterError::initialization("scripted failure"));
        }

        let id = PresenterId::new();
        let shared = Arc::new(ScriptedShared {
            id,
            slots: SnapshotSlots::new(id, self.retained_states),
            to_home,
            active: Mutex::new(None),
            stored: Mutex::new(Vec::new()),
            connects: AtomicUsize::new(0),
            dispatched: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        });
        self.presenters.lock().push(Arc::clone(&shared));
        Ok(PresenterHandle::new(Box::new(ScriptedPresenter { shared })))
    }
}

/// Test-side remote control for one scripted presenter.
pub struct ScriptedShared {
    id: PresenterId,
    slots: SnapshotSlots,
    to_home: NavigationCallback,
    active: Mutex<Option<StateCallback>>,
    stored: Mutex<Vec<StateCallback>>,
    connects: AtomicUsize,
    dispatched: Mutex<Vec<LoginAction>>,
    closed: AtomicBool,
}

impl ScriptedShared {
    pub fn id(&self) -> PresenterId {
        self.id
    }

    /// Publish `state` and notify the active observer, if any.
    pub fn emit(&self, state: LoginState) -> Option<StateToken> {
        let token = self.slots.publish(state)?;
        let callback = self.active.lock().clone();
        if let Some(callback) = callback {
            callback(token);
        }
        Some(token)
    }

    /// Publish without notifying anyone.
    pub fn publish_silently(&self, state: LoginState) -> Option<StateToken> {
        self.slots.publish(state)
    }

    pub fn navigate(&self) {
        (self.to_home)();
    }

    /// Every callback ever passed to `connect`, in order.
    pub fn stored_callbacks(&self) -> Vec<StateCallback> {
        self.stored.lock().clone()
    }

    pub fn has_active_observer(&self) -> bool {
        self.active.lock().is_some()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn dispatched(&self) -> Vec<LoginAction> {
        self.dispatched.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

struct ScriptedPresenter {
    shared: Arc<ScriptedShared>,
}

impl LoginPresenter for ScriptedPresenter {
    fn id(&self) -> PresenterId {
        self.shared.id
    }

    fn connect(&mut self, callback: StateCallback) -> Result<ConnectOutcome, PresenterError> {
        self.shared.connects.fetch_add(1, Ordering::SeqCst);
        self.shared.stored.lock().push(Arc::clone(&callback));
        match self.shared.active.lock().replace(callback) {
            Some(_) => Ok(ConnectOutcome::Replaced),
            None => Ok(ConnectOutcome::Connected),
        }
    }

    fn disconnect(&mut self) {
        self.shared.active.lock().take();
    }

    fn unwrap_state(&self, token: &StateToken) -> Result<LoginState, PresenterError> {
        self.shared.slots.resolve(token)
    }

    fn dispatch(&self, action: LoginAction) -> Result<(), PresenterError> {
        self.shared.dispatched.lock().push(action);
        Ok(())
    }

    fn close(&mut self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        self.shared.active.lock().take();
        self.shared.slots.dispose();
    }
}

/// View over `library` plus its event queue and error registry.
pub fn view_with(
    library: Arc<dyn PresenterLibrary>,
) -> (LoginView, Receiver<AppEvent>, ErrorRegistry) {
    let (dispatcher, rx) = UiDispatcher::channel();
    let errors = ErrorRegistry::default();
    let view = LoginView::construct(library, dispatcher, errors.clone());
    (view, rx, errors)
}

pub fn view_with_host(
    library: Arc<dyn PresenterLibrary>,
    host: &str,
) -> (LoginView, Receiver<AppEvent>, ErrorRegistry) {
    let (dispatcher, rx) = UiDispatcher::channel();
    let errors = ErrorRegistry::default();
    let view = LoginView::construct_with_host(library, dispatcher, errors.clone(), host);
    (view, rx, errors)
}

/// Apply every queued presenter event. Returns how many were applied.
pub fn pump(view: &mut LoginView, rx: &Receiver<AppEvent>) -> usize {
    let mut applied = 0;
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::Presenter(event) = event {
            view.on_presenter_event(event);
            applied += 1;
        }
    }
    applied
}

/// Apply presenter events as they arrive until `done` holds or `timeout`
/// passes. Returns whether `done` held.
pub fn pump_until(
    view: &mut LoginView,
    rx: &Receiver<AppEvent>,
    timeout: Duration,
    mut done: impl FnMut(&LoginView) -> bool,
) -> bool {
    let deadline = Instant::now() + timeout;
    while !done(view) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return false;
        }
        match rx.recv_timeout(remaining) {
            Ok(AppEvent::Presenter(event)) => view.on_presenter_event(event),
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => return false,
            Err(RecvTimeoutError::Disconnected) => return done(view),
        }
    }
    true
}
