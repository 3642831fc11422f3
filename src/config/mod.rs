mod loader;
mod store;
mod types;

pub use loader::ConfigError;
pub use store::{ConfigOverride, ConfigStore};
pub use types::{Config, LoggingConfig, LoginOutcome, PresenterSettings, UiSettings};
