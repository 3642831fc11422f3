//! Callback bridge between presenter threads and the UI thread.
//!
//! The presenter invokes the callbacks built here from its own threads. They
//! never touch view state: each one checks the binding's [`LivenessFlag`] and
//! enqueues a [`PresenterEvent`] tagged with the binding id, and the UI thread
//! applies it on its next loop iteration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::error::{ErrorCategory, ErrorRegistry};
use crate::presenter::{NavigationCallback, StateCallback, StateToken};
use crate::ui::events::AppEvent;

/// Shared "target still exists" flag for one binding.
#[derive(Debug, Clone)]
pub struct LivenessFlag(Arc<AtomicBool>);

impl LivenessFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Mark the target as gone. Every clone observes it.
    pub fn invalidate(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for LivenessFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of one view binding. Increases with every rebind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u64);

impl std::fmt::Display for BindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "binding-{}", self.0)
    }
}

/// Presenter notifications after they have been marshaled to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    StateChanged { binding: BindingId, token: StateToken },
    NavigateHome { binding: BindingId },
}

impl PresenterEvent {
    pub fn binding(&self) -> BindingId {
        match self {
            PresenterEvent::StateChanged { binding, .. } => *binding,
            PresenterEvent::NavigateHome { binding } => *binding,
        }
    }
}

/// Sending side of the UI event queue.
///
/// Sending never blocks; if the UI loop is gone the event is dropped.
#[derive(Clone)]
pub struct UiDispatcher {
    tx: Sender<AppEvent>,
}

impl UiDispatcher {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }

    /// Fresh queue, for running a view without a terminal.
    pub fn channel() -> (Self, Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    /// Returns `false` if the receiving side has been dropped.
    pub fn send(&self, event: AppEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Everything a binding's callbacks capture.
#[derive(Clone)]
pub struct BridgeContext {
    pub binding: BindingId,
    pub liveness: LivenessFlag,
    pub dispatcher: UiDispatcher,
    pub errors: ErrorRegistry,
}

impl BridgeContext {
    pub fn new(binding: BindingId, dispatcher: UiDispatcher, errors: ErrorRegistry) -> Self {
        Self {
            binding,
            liveness: LivenessFlag::new(),
            dispatcher,
            errors,
        }
    }

    fn forward(&self, event: PresenterEvent, kind: &'static str) {
        if !self.liveness.is_alive() {
            tracing::debug!(binding = %self.binding, kind, "callback after teardown ignored");
            self.errors.record(
                ErrorCategory::Reentrancy,
                format!("{kind} callback fired after {} was torn down", self.binding),
            );
            return;
        }
        if !self.dispatcher.send(AppEvent::Presenter(event)) {
            tracing::debug!(binding = %self.binding, kind, "ui queue closed, event dropped");
        }
    }
}

/// Navigation callback handed to the presenter factory.
pub fn to_home_callback(ctx: &BridgeContext) -> NavigationCallback {
    let ctx = ctx.clone();
    Box::new(move || {
        ctx.forward(
            PresenterEvent::NavigateHome {
                binding: ctx.binding,
            },
            "navigation",
        );
    })
}

/// State callback handed to `connect`.
pub fn state_callback(ctx: &BridgeContext) -> StateCallback {
    let ctx = ctx.clone();
    Arc::new(move |token| {
        tracing::trace!(binding = %ctx.binding, %token, "state changed");
        ctx.forward(
            PresenterEvent::StateChanged {
                binding: ctx.binding,
                token,
            },
            "state",
        );
    })
}
