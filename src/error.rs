//! Recent recoverable errors, shared between the bridge and the view.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

const DEFAULT_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Presenter factory failed.
    Initialization,
    /// A token no longer resolved.
    StaleToken,
    /// A callback fired after its binding was torn down.
    Reentrancy,
    /// A presenter operation was rejected.
    Presenter,
    /// Config could not be (re)loaded.
    Config,
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Initialization => "init",
            ErrorCategory::StaleToken => "stale",
            ErrorCategory::Reentrancy => "late callback",
            ErrorCategory::Presenter => "presenter",
            ErrorCategory::Config => "config",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub category: ErrorCategory,
    pub message: String,
}

/// Bounded ring of [`ErrorEntry`] values. Cheap to clone; clones share
/// storage.
#[derive(Clone)]
pub struct ErrorRegistry {
    capacity: usize,
    entries: Arc<RwLock<VecDeque<ErrorEntry>>>,
}

impl ErrorRegistry {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
        }
    }

    pub fn record(&self, category: ErrorCategory, message: impl Into<String>) {
        let entry = ErrorEntry {
            category,
            message: message.into(),
        };
        let mut entries = self.entries.write();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn latest(&self) -> Option<ErrorEntry> {
        self.entries.read().back().cloned()
    }

    /// Number of retained entries in `category`.
    pub fn count(&self, category: ErrorCategory) -> usize {
        self.entries
            .read()
            .iter()
            .filter(|entry| entry.category == category)
            .count()
    }
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
