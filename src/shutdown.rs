use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ShutdownPhase {
    Running = 0,
    Signaled = 1,
    StoppingInput = 2,
    ClosingPresenter = 3,
    RestoringTerminal = 4,
    Complete = 5,
}

pub struct ShutdownCoordinator {
    shutdown: Arc<AtomicBool>,
    phase: Arc<AtomicU8>,
    notify: Arc<Notify>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            phase: Arc::new(AtomicU8::new(ShutdownPhase::Running as u8)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Signal shutdown start
    pub fn signal(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            tracing::info!("graceful shutdown initiated");
            self.advance(ShutdownPhase::Signaled);
            self.notify.notify_waiters();
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> ShutdownPhase {
        match self.phase.load(Ordering::SeqCst) {
            0 => ShutdownPhase::Running,
            1 => ShutdownPhase::Signaled,
            2 => ShutdownPhase::StoppingInput,
            3 => ShutdownPhase::ClosingPresenter,
            4 => ShutdownPhase::RestoringTerminal,
            _ => ShutdownPhase::Complete,
        }
    }

    /// Advance to `phase`. Phases only move forward.
    pub fn advance(&self, phase: ShutdownPhase) {
        let previous = self.phase.fetch_max(phase as u8, Ordering::SeqCst);
        if previous < phase as u8 {
            tracing::debug!(?phase, "shutdown phase");
        }
    }

    /// Create a handle for sharing
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown: Arc::clone(&self.shutdown),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lightweight handle for checking shutdown state
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn signal(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub async fn wait(&self) {
        // Register with Notify before checking the flag; a signal() between
        // the check and the await would otherwise be lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_only_move_forward() {
        let coordinator = ShutdownCoordinator::new();
        assert_eq!(coordinator.phase(), ShutdownPhase::Running);

        coordinator.signal();
        assert_eq!(coordinator.phase(), ShutdownPhase::Signaled);

        coordinator.advance(ShutdownPhase::ClosingPresenter);
        coordinator.advance(ShutdownPhase::StoppingInput);
        assert_eq!(coordinator.phase(), ShutdownPhase::ClosingPresenter);

        coordinator.advance(ShutdownPhase::Complete);
        assert_eq!(coordinator.phase(), ShutdownPhase::Complete);
    }

    #[test]
    fn handle_sees_coordinator_signal() {
        let coordinator = ShutdownCoordinator::new();
        let handle = coordinator.handle();
        assert!(!handle.is_shutting_down());
        coordinator.signal();
        assert!(handle.is_shutting_down());
    }

    #[test]
    fn wait_returns_after_signal_from_handle() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let coordinator = ShutdownCoordinator::new();
        let handle = coordinator.handle();
        let waiter = coordinator.handle();

        runtime.block_on(async move {
            let task = tokio::spawn(async move { waiter.wait().await });
            handle.signal();
            task.await.unwrap();
        });
        assert!(coordinator.is_shutting_down());
    }
}
