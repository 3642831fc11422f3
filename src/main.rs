use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use login_shell::config::{Config, ConfigStore, LoginOutcome};
use login_shell::logging::init_tracing;

#[derive(Parser, Debug, Clone)]
#[command(name = "login-shell", version, about = "Terminal login screen shell")]
struct Cli {
    /// Config file (default: <config dir>/login-shell/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Host prefilled into the login form
    #[arg(long)]
    host: Option<String>,
    /// Make the first presenter creation fail, to exercise the retry path
    #[arg(long)]
    fail_init: bool,
    /// How a sign-in ends
    #[arg(long, value_enum)]
    outcome: Option<CliOutcome>,
    /// Simulated sign-in round trip
    #[arg(long, value_name = "MS")]
    login_delay_ms: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum CliOutcome {
    Authenticated,
    Failed,
}

impl From<CliOutcome> for LoginOutcome {
    fn from(outcome: CliOutcome) -> Self {
        match outcome {
            CliOutcome::Authenticated => LoginOutcome::Authenticated,
            CliOutcome::Failed => LoginOutcome::Failed,
        }
    }
}

impl Cli {
    /// Overrides that survive a config reload. `--fail-init` is not one of
    /// them: it only affects the first presenter, so a retry can succeed.
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.ui.default_host = host.clone();
        }
        if let Some(outcome) = self.outcome {
            config.presenter.outcome = outcome.into();
        }
        if let Some(delay) = self.login_delay_ms {
            config.presenter.login_delay_ms = delay;
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&path)?;
    if cli.fail_init {
        config.presenter.fail_init = true;
    }

    // Flags win over the file, including after a reload on retry
    let overrides = cli.clone();
    let store = ConfigStore::new(config, path)
        .with_overrides(Arc::new(move |config: &mut Config| overrides.apply(config)));

    let settings = store.get();
    if let Some(log_file) = init_tracing(&settings.logging) {
        tracing::info!(
            log_file = %log_file.display(),
            config = %store.path().display(),
            "login-shell starting"
        );
    }

    login_shell::ui::run(store)
}
