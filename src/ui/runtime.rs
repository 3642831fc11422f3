use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::runtime::Runtime;

use crate::config::ConfigStore;
use crate::error::ErrorRegistry;
use crate::presenter::simulated::SimulatedLibrary;
use crate::shutdown::{ShutdownCoordinator, ShutdownPhase};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Multi-thread runtime the presenter library runs on.
pub fn presenter_runtime(worker_threads: usize) -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads.max(1))
        .thread_name("presenter")
        .enable_all()
        .build()
}

pub fn run(config: ConfigStore) -> anyhow::Result<()> {
    let settings = config.get();
    let runtime = presenter_runtime(settings.presenter.worker_threads)
        .context("failed to start presenter runtime")?;
    let tick_rate = Duration::from_millis(settings.ui.tick_rate_ms);

    let shutdown = ShutdownCoordinator::new();
    let events = EventHandler::new(tick_rate, shutdown.handle());
    spawn_signal_listener(&runtime, &shutdown, &events);

    let (mut terminal, guard) = setup_terminal().context("failed to set up terminal")?;
    let library = Arc::new(SimulatedLibrary::new(runtime.handle().clone(), config.clone()));
    let mut app = App::new(config, library, events.dispatcher(), ErrorRegistry::default());

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(event) => {
                if matches!(event, AppEvent::Shutdown) {
                    shutdown.signal();
                }
                app.on_event(event);
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    shutdown.signal();
    shutdown.advance(ShutdownPhase::StoppingInput);
    shutdown.advance(ShutdownPhase::ClosingPresenter);
    app.close();
    drop(app);
    runtime.shutdown_timeout(Duration::from_millis(500));

    shutdown.advance(ShutdownPhase::RestoringTerminal);
    guard.restore();
    drop(terminal);
    shutdown.advance(ShutdownPhase::Complete);
    tracing::info!(phase = ?shutdown.phase(), "login-shell stopped");
    Ok(())
}

/// Map Ctrl-C and SIGTERM onto `AppEvent::Shutdown`.
fn spawn_signal_listener(runtime: &Runtime, shutdown: &ShutdownCoordinator, events: &EventHandler) {
    let dispatcher = events.dispatcher();
    let handle = shutdown.handle();
    runtime.spawn(async move {
        tokio::select! {
            _ = wait_for_signal() => {
                tracing::info!("termination signal received");
                dispatcher.send(AppEvent::Shutdown);
            }
            _ = handle.wait() => {}
        }
    });
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "SIGTERM handler unavailable");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
