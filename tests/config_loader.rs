use std::io::Write;

use login_shell::config::{Config, ConfigError, LoginOutcome};
use tempfile::{NamedTempFile, TempDir};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.ui.default_host, "mastodon.social");

    assert!(!config.presenter.fail_init);
    assert_eq!(config.presenter.login_delay_ms, 800);
    assert_eq!(config.presenter.outcome, LoginOutcome::Authenticated);
    assert_eq!(config.presenter.retained_states, 16);
    assert_eq!(config.presenter.worker_threads, 2);

    assert!(config.logging.file.is_none());
    assert_eq!(config.logging.filter, "info");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.ui.tick_rate_ms, 250);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = write_config(
        r#"
[presenter]
outcome = "failed"
failure_message = "nope"

[logging]
file = "/tmp/login-shell.log"
"#,
    );
    let config = Config::load_from(file.path()).unwrap();

    assert_eq!(config.presenter.outcome, LoginOutcome::Failed);
    assert_eq!(config.presenter.failure_message, "nope");
    assert_eq!(config.presenter.login_delay_ms, 800);
    assert_eq!(config.ui.default_host, "mastodon.social");
    assert_eq!(
        config.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/login-shell.log"))
    );
}

#[test]
fn test_unknown_outcome_is_parse_error() {
    let file = write_config("[presenter]\noutcome = \"maybe\"\n");
    let err = Config::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let file = write_config("[ui\ntick_rate_ms = 1");
    let err = Config::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_validation_rejects_zero_values() {
    for content in [
        "[ui]\ntick_rate_ms = 0\n",
        "[presenter]\nretained_states = 0\n",
        "[presenter]\nworker_threads = 0\n",
    ] {
        let file = write_config(content);
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { .. }),
            "expected validation error for {content:?}"
        );
    }
}

#[test]
fn test_unreadable_path_is_read_error() {
    let dir = TempDir::new().unwrap();
    // A directory exists but cannot be read as a file
    let err = Config::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}
