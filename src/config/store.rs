//! Thread-safe configuration storage.
//!
//! Holds the active config behind a lock so the UI can reload it on retry
//! while the presenter library reads it from the factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Overrides applied on top of whatever the file says, on load and on
/// every reload.
pub type ConfigOverride = Arc<dyn Fn(&mut Config) + Send + Sync>;

/// Thread-safe config container with interior mutability.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
    overrides: Option<ConfigOverride>,
}

impl ConfigStore {
    /// Create a new ConfigStore from initial config and path.
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
            overrides: None,
        }
    }

    /// Apply `overrides` now and after every successful reload.
    pub fn with_overrides(mut self, overrides: ConfigOverride) -> Self {
        overrides(&mut *self.inner.write());
        self.overrides = Some(overrides);
        self
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Reload config from the file.
    ///
    /// On success, atomically replaces the current config.
    /// On failure, keeps the old config and returns the error.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let mut config = Config::load_from(&self.path)?;
        if let Some(overrides) = &self.overrides {
            overrides(&mut config);
        }
        *self.inner.write() = config;
        tracing::info!(path = %self.path.display(), "config reloaded");
        Ok(())
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
