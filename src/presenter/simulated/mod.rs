//! In-process presenter library.
//!
//! Implements the presenter contract on a tokio runtime so that every
//! callback reaches the shell from a foreign thread, exactly as a shared
//! presenter library would:
//!
//! ```text
//! dispatch ──→ engine task ──→ StateStream ──→ collector task ──→ SnapshotSlots
//!                  │                                  │
//!                  └──→ to_home()                     └──→ callback(token)
//! ```

mod engine;
mod stream;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::config::ConfigStore;
use crate::presenter::action::LoginAction;
use crate::presenter::error::PresenterError;
use crate::presenter::handle::{
    ConnectOutcome, LoginPresenter, NavigationCallback, PresenterHandle, PresenterLibrary,
    StateCallback,
};
use crate::presenter::slots::SnapshotSlots;
use crate::presenter::state::{LoginState, PresenterId, StateToken};

pub use engine::{EngineSettings, HOST_REQUIRED, MISSING_CODE};
pub use stream::StateStream;

/// Presenter factory backed by a tokio runtime.
///
/// Settings are read from the [`ConfigStore`] on every `create_presenter`
/// call, so a retry after a config reload picks up the new values.
pub struct SimulatedLibrary {
    runtime: Handle,
    config: ConfigStore,
}

impl SimulatedLibrary {
    pub fn new(runtime: Handle, config: ConfigStore) -> Self {
        Self { runtime, config }
    }
}

impl PresenterLibrary for SimulatedLibrary {
    fn create_presenter(
        &self,
        to_home: NavigationCallback,
    ) -> Result<PresenterHandle, PresenterError> {
        let settings = self.config.get().presenter;
        if settings.fail_init {
            tracing::warn!(reason = %settings.init_failure_reason, "presenter factory refused");
            return Err(PresenterError::initialization(
                settings.init_failure_reason.clone(),
            ));
        }

        let presenter = SimulatedPresenter::spawn(
            self.runtime.clone(),
            EngineSettings::from(&settings),
            settings.retained_states,
            to_home,
        );
        tracing::info!(presenter = %presenter.id(), "presenter created");
        Ok(PresenterHandle::new(Box::new(presenter)))
    }
}

pub struct SimulatedPresenter {
    id: PresenterId,
    runtime: Handle,
    stream: Arc<StateStream>,
    slots: Arc<SnapshotSlots>,
    actions: Option<mpsc::UnboundedSender<LoginAction>>,
    engine: Option<JoinHandle<()>>,
    collector: Option<Collector>,
}

/// Delivery gate for one `connect`.
///
/// `cancel` waits for a callback already in flight; once it returns the
/// callback is never invoked again. Task abort only lands at the next yield
/// point, and `recv` does not yield while the broadcast buffer holds states.
struct Subscription {
    active: Mutex<bool>,
}

impl Subscription {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            active: Mutex::new(true),
        })
    }

    fn cancel(&self) {
        *self.active.lock() = false;
    }

    /// Publish `state` and hand its token to `callback`. Returns `false` once
    /// the subscription is cancelled or the slots are disposed.
    fn deliver(
        &self,
        slots: &SnapshotSlots,
        callback: &StateCallback,
        state: LoginState,
    ) -> bool {
        let active = self.active.lock();
        if !*active {
            return false;
        }
        match slots.publish(state) {
            Some(token) => {
                callback(token);
                true
            }
            None => false,
        }
    }
}

struct Collector {
    subscription: Arc<Subscription>,
    task: JoinHandle<()>,
}

impl Collector {
    fn stop(self) {
        self.subscription.cancel();
        self.task.abort();
    }
}

impl SimulatedPresenter {
    pub fn spawn(
        runtime: Handle,
        settings: EngineSettings,
        retained_states: usize,
        to_home: NavigationCallback,
    ) -> Self {
        let id = PresenterId::new();
        let stream = Arc::new(StateStream::new(LoginState::idle()));
        let slots = Arc::new(SnapshotSlots::new(id, retained_states));
        let (actions, receiver) = mpsc::unbounded_channel();
        let engine = runtime.spawn(engine::run(
            id,
            receiver,
            Arc::clone(&stream),
            to_home,
            settings,
        ));

        Self {
            id,
            runtime,
            stream,
            slots,
            actions: Some(actions),
            engine: Some(engine),
            collector: None,
        }
    }
}

impl LoginPresenter for SimulatedPresenter {
    fn id(&self) -> PresenterId {
        self.id
    }

    fn connect(&mut self, callback: StateCallback) -> Result<ConnectOutcome, PresenterError> {
        if self.slots.is_disposed() {
            return Err(PresenterError::Closed);
        }
        let outcome = match self.collector.take() {
            Some(previous) => {
                previous.stop();
                tracing::debug!(presenter = %self.id, "replacing state observer");
                ConnectOutcome::Replaced
            }
            None => ConnectOutcome::Connected,
        };

        let (current, receiver) = self.stream.subscribe();
        let subscription = Subscription::new();
        let task = self.runtime.spawn(collect(
            self.id,
            current,
            receiver,
            Arc::clone(&self.slots),
            Arc::clone(&subscription),
            callback,
        ));
        self.collector = Some(Collector { subscription, task });
        Ok(outcome)
    }

    fn disconnect(&mut self) {
        if let Some(collector) = self.collector.take() {
            collector.stop();
        }
    }

    fn unwrap_state(&self, token: &StateToken) -> Result<LoginState, PresenterError> {
        self.slots.resolve(token)
    }

    fn dispatch(&self, action: LoginAction) -> Result<(), PresenterError> {
        let sender = self.actions.as_ref().ok_or(PresenterError::Closed)?;
        sender.send(action).map_err(|_| PresenterError::Closed)
    }

    fn close(&mut self) {
        self.disconnect();
        self.actions = None;
        if let Some(engine) = self.engine.take() {
            engine.abort();
        }
        self.slots.dispose();
    }
}

impl Drop for SimulatedPresenter {
    fn drop(&mut self) {
        self.close();
    }
}

async fn collect(
    presenter: PresenterId,
    current: LoginState,
    mut receiver: broadcast::Receiver<LoginState>,
    slots: Arc<SnapshotSlots>,
    subscription: Arc<Subscription>,
    callback: StateCallback,
) {
    if !subscription.deliver(&slots, &callback, current) {
        return;
    }
    loop {
        match receiver.recv().await {
            Ok(state) => {
                if !subscription.deliver(&slots, &callback, state) {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(%presenter, skipped, "state observer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoginOutcome};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .build()
            .unwrap()
    }

    fn library(runtime: &tokio::runtime::Runtime, config: Config) -> SimulatedLibrary {
        let store = ConfigStore::new(config, PathBuf::from("/tmp/login-shell-test.toml"));
        SimulatedLibrary::new(runtime.handle().clone(), store)
    }

    #[test]
    fn factory_fails_when_configured_to() {
        let rt = runtime();
        let mut config = Config::default();
        config.presenter.fail_init = true;
        config.presenter.init_failure_reason = "no symbols".to_string();

        let err = library(&rt, config)
            .create_presenter(Box::new(|| {}))
            .unwrap_err();
        assert!(matches!(
            err,
            PresenterError::Initialization { ref reason } if reason == "no symbols"
        ));
    }

    #[test]
    fn connect_replays_idle_state() {
        let rt = runtime();
        let mut handle = library(&rt, Config::default())
            .create_presenter(Box::new(|| {}))
            .unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        let outcome = handle
            .connect(Arc::new(move |token| {
                let _ = tx.send(token);
            }))
            .unwrap();
        assert_eq!(outcome, ConnectOutcome::Connected);

        let token = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let state = handle.unwrap_state(&token).unwrap();
        assert!(!state.is_loading());
    }

    #[test]
    fn failed_outcome_emits_error_without_navigation() {
        let rt = runtime();
        let mut config = Config::default();
        config.presenter.login_delay_ms = 5;
        config.presenter.outcome = LoginOutcome::Failed;
        config.presenter.failure_message = "denied".to_string();

        let navigations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&navigations);
        let mut handle = library(&rt, config)
            .create_presenter(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        handle
            .connect(Arc::new(move |token| {
                let _ = tx.send(token);
            }))
            .unwrap();
        handle
            .dispatch(LoginAction::Submit {
                host: "example.org".to_string(),
            })
            .unwrap();

        let mut last = LoginState::idle();
        while last.error().is_none() {
            let token = rx.recv_timeout(Duration::from_secs(2)).unwrap();
            last = handle.unwrap_state(&token).unwrap();
        }
        assert_eq!(last.error(), Some("denied"));
        assert_eq!(navigations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancelled_subscription_neither_publishes_nor_calls_back() {
        let slots = SnapshotSlots::new(PresenterId::new(), 4);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let callback: StateCallback = Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let subscription = Subscription::new();
        assert!(subscription.deliver(&slots, &callback, LoginState::idle()));
        subscription.cancel();
        assert!(!subscription.deliver(&slots, &callback, LoginState::in_progress()));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let token = slots.publish(LoginState::idle()).unwrap();
        assert_eq!(token.sequence(), 1);
    }

    #[test]
    fn close_disposes_tokens() {
        let rt = runtime();
        let mut handle = library(&rt, Config::default())
            .create_presenter(Box::new(|| {}))
            .unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        handle
            .connect(Arc::new(move |token| {
                let _ = tx.send(token);
            }))
            .unwrap();
        let token = rx.recv_timeout(Duration::from_secs(2)).unwrap();

        handle.close();
        assert!(handle.unwrap_state(&token).is_err());
    }
}
