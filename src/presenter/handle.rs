use std::sync::Arc;

use crate::presenter::action::LoginAction;
use crate::presenter::error::PresenterError;
use crate::presenter::state::{LoginState, PresenterId, StateToken};

/// Invoked by the presenter once login completes.
pub type NavigationCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// Invoked by the presenter on every state change, from its own threads.
pub type StateCallback = Arc<dyn Fn(StateToken) + Send + Sync + 'static>;

/// Result of registering a state observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// No observer was registered before.
    Connected,
    /// A previous observer was cancelled and replaced.
    Replaced,
}

/// The presenter boundary the shell consumes.
///
/// Implementations may call the registered [`StateCallback`] and the
/// [`NavigationCallback`] from any thread, at any time between `connect` and
/// `close`.
pub trait LoginPresenter: Send {
    fn id(&self) -> PresenterId;

    /// Register the state observer. A second call replaces the first; at most
    /// one callback chain is ever active.
    fn connect(&mut self, callback: StateCallback) -> Result<ConnectOutcome, PresenterError>;

    /// Cancel the active observer, if any.
    fn disconnect(&mut self);

    fn unwrap_state(&self, token: &StateToken) -> Result<LoginState, PresenterError>;

    fn dispatch(&self, action: LoginAction) -> Result<(), PresenterError>;

    /// Stop all presenter work and release every snapshot. Idempotent.
    fn close(&mut self);
}

/// Factory for presenters, injected into the view.
pub trait PresenterLibrary: Send + Sync {
    fn create_presenter(
        &self,
        to_home: NavigationCallback,
    ) -> Result<PresenterHandle, PresenterError>;
}

/// Exclusively owned handle to one presenter instance.
///
/// Not `Clone`. Closing is explicit through [`PresenterHandle::close`] and
/// also happens on drop.
pub struct PresenterHandle {
    inner: Box<dyn LoginPresenter>,
    closed: bool,
}

impl PresenterHandle {
    pub fn new(inner: Box<dyn LoginPresenter>) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    pub fn id(&self) -> PresenterId {
        self.inner.id()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn connect(&mut self, callback: StateCallback) -> Result<ConnectOutcome, PresenterError> {
        if self.closed {
            return Err(PresenterError::Closed);
        }
        self.inner.connect(callback)
    }

    pub fn disconnect(&mut self) {
        if !self.closed {
            self.inner.disconnect();
        }
    }

    pub fn unwrap_state(&self, token: &StateToken) -> Result<LoginState, PresenterError> {
        if self.closed {
            return Err(PresenterError::Closed);
        }
        self.inner.unwrap_state(token)
    }

    pub fn dispatch(&self, action: LoginAction) -> Result<(), PresenterError> {
        if self.closed {
            return Err(PresenterError::Closed);
        }
        self.inner.dispatch(action)
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.inner.disconnect();
        self.inner.close();
        tracing::debug!(presenter = %self.inner.id(), "presenter closed");
    }
}

impl Drop for PresenterHandle {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for PresenterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenterHandle")
            .field("id", &self.inner.id())
            .field("closed", &self.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Calls {
        disconnects: AtomicUsize,
        closes: AtomicUsize,
        dispatched: Mutex<Vec<LoginAction>>,
    }

    struct Probe {
        id: PresenterId,
        calls: Arc<Calls>,
    }

    impl LoginPresenter for Probe {
        fn id(&self) -> PresenterId {
            self.id
        }

        fn connect(&mut self, _: StateCallback) -> Result<ConnectOutcome, PresenterError> {
            Ok(ConnectOutcome::Connected)
        }

        fn disconnect(&mut self) {
            self.calls.disconnects.fetch_add(1, Ordering::SeqCst);
        }

        fn unwrap_state(&self, _: &StateToken) -> Result<LoginState, PresenterError> {
            Ok(LoginState::idle())
        }

        fn dispatch(&self, action: LoginAction) -> Result<(), PresenterError> {
            self.calls.dispatched.lock().push(action);
            Ok(())
        }

        fn close(&mut self) {
            self.calls.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn probe() -> (PresenterHandle, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let handle = PresenterHandle::new(Box::new(Probe {
            id: PresenterId::new(),
            calls: Arc::clone(&calls),
        }));
        (handle, calls)
    }

    #[test]
    fn close_is_idempotent_and_runs_once() {
        let (mut handle, calls) = probe();
        handle.close();
        handle.close();
        drop(handle);
        assert_eq!(calls.closes.load(Ordering::SeqCst), 1);
        assert_eq!(calls.disconnects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_closes_presenter() {
        let (handle, calls) = probe();
        drop(handle);
        assert_eq!(calls.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn operations_after_close_are_rejected() {
        let (mut handle, calls) = probe();
        handle.close();

        let token = StateToken::new(handle.id(), 0);
        assert!(matches!(
            handle.unwrap_state(&token),
            Err(PresenterError::Closed)
        ));
        assert!(matches!(
            handle.dispatch(LoginAction::Submit {
                host: "h".to_string()
            }),
            Err(PresenterError::Closed)
        ));
        assert!(matches!(
            handle.connect(Arc::new(|_| {})),
            Err(PresenterError::Closed)
        ));
        assert!(calls.dispatched.lock().is_empty());
    }
}
