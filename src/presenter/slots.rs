//! Token registry for published snapshots.
//!
//! Every state a presenter publishes is stored under a fresh sequence number
//! and handed out as a [`StateToken`]. Only the most recent `capacity`
//! snapshots are retained; older tokens resolve to
//! [`StaleReason::Evicted`]. After [`SnapshotSlots::dispose`] nothing
//! resolves and nothing new is published.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::presenter::error::{PresenterError, StaleReason};
use crate::presenter::state::{LoginState, PresenterId, StateToken};

pub const DEFAULT_RETAINED_STATES: usize = 16;

pub struct SnapshotSlots {
    presenter: PresenterId,
    capacity: usize,
    inner: Mutex<SlotsInner>,
}

struct SlotsInner {
    next_sequence: u64,
    retained: VecDeque<(u64, LoginState)>,
    disposed: bool,
}

impl SnapshotSlots {
    pub fn new(presenter: PresenterId, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            presenter,
            capacity,
            inner: Mutex::new(SlotsInner {
                next_sequence: 0,
                retained: VecDeque::with_capacity(capacity),
                disposed: false,
            }),
        }
    }

    /// Store a snapshot and mint its token.
    ///
    /// Returns `None` once the slots have been disposed.
    pub fn publish(&self, state: LoginState) -> Option<StateToken> {
        let mut inner = self.inner.lock();
        if inner.disposed {
            return None;
        }
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;
        if inner.retained.len() == self.capacity {
            inner.retained.pop_front();
        }
        inner.retained.push_back((sequence, state));
        Some(StateToken::new(self.presenter, sequence))
    }

    pub fn resolve(&self, token: &StateToken) -> Result<LoginState, PresenterError> {
        if token.presenter() != self.presenter {
            return Err(PresenterError::stale(*token, StaleReason::ForeignPresenter));
        }
        let inner = self.inner.lock();
        if inner.disposed {
            return Err(PresenterError::stale(*token, StaleReason::Disposed));
        }
        if token.sequence() >= inner.next_sequence {
            return Err(PresenterError::stale(*token, StaleReason::NotYetIssued));
        }
        inner
            .retained
            .iter()
            .find(|(sequence, _)| *sequence == token.sequence())
            .map(|(_, state)| state.clone())
            .ok_or_else(|| PresenterError::stale(*token, StaleReason::Evicted))
    }

    /// Release every retained snapshot. Idempotent.
    pub fn dispose(&self) {
        let mut inner = self.inner.lock();
        inner.disposed = true;
        inner.retained.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }
}
