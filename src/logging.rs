use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable naming the log file. Wins over `[logging].file`.
pub const LOG_ENV: &str = "LOGIN_SHELL_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is disabled unless a file is configured, since anything written
/// to stdout or stderr would corrupt the TUI. Log files get unique names so
/// concurrent instances don't clobber each other: `{path}.{timestamp}.{pid}`.
///
/// Returns the file actually written to, if any.
pub fn init_tracing(config: &LoggingConfig) -> Option<PathBuf> {
    let base = std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .or_else(|| config.file.clone())?;

    let unique_path = unique_log_path(&base);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!(
            "Warning: Failed to create log file: {}",
            unique_path.display()
        );
        return None;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
    if installed.is_err() {
        return None;
    }
    Some(unique_path)
}

fn unique_log_path(base: &Path) -> PathBuf {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from(format!("{}.{}.{}", base.display(), timestamp, pid))
}
