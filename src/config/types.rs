use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::presenter::DEFAULT_RETAINED_STATES;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub presenter: PresenterSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Terminal shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Interval between tick events in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Host prefilled into the login form.
    #[serde(default = "default_host")]
    pub default_host: String,
}

/// How the simulated presenter ends a sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginOutcome {
    #[default]
    Authenticated,
    Failed,
}

/// Behaviour of the presenter library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterSettings {
    /// Make the factory refuse to create a presenter.
    #[serde(default)]
    pub fail_init: bool,
    #[serde(default = "default_init_failure_reason")]
    pub init_failure_reason: String,
    /// Simulated round trip of a sign-in in milliseconds (default: 800).
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
    #[serde(default)]
    pub outcome: LoginOutcome,
    #[serde(default = "default_failure_message")]
    pub failure_message: String,
    /// Number of published snapshots whose tokens still resolve (default: 16).
    #[serde(default = "default_retained_states")]
    pub retained_states: usize,
    /// Threads of the presenter runtime (default: 2).
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log file base path. Logging is off when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_host() -> String {
    "mastodon.social".to_string()
}

fn default_init_failure_reason() -> String {
    "presenter library failed to initialize".to_string()
}

fn default_login_delay_ms() -> u64 {
    800
}

fn default_failure_message() -> String {
    "Server rejected the sign-in request.".to_string()
}

fn default_retained_states() -> usize {
    DEFAULT_RETAINED_STATES
}

fn default_worker_threads() -> usize {
    2
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            default_host: default_host(),
        }
    }
}

impl Default for PresenterSettings {
    fn default() -> Self {
        Self {
            fail_init: false,
            init_failure_reason: default_init_failure_reason(),
            login_delay_ms: default_login_delay_ms(),
            outcome: LoginOutcome::default(),
            failure_message: default_failure_message(),
            retained_states: default_retained_states(),
            worker_threads: default_worker_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: default_filter(),
        }
    }
}
