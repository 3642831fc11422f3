use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

use crate::bridge::{PresenterEvent, UiDispatcher};
use crate::shutdown::ShutdownHandle;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    /// Marshaled presenter callback.
    Presenter(PresenterEvent),
    /// OS signal received (SIGTERM, SIGINT)
    Shutdown,
}

/// Input thread plus the single queue the UI loop drains.
///
/// Terminal input, ticks, presenter callbacks and signals all arrive on the
/// same channel, so the UI thread is the only consumer of view state.
pub struct EventHandler {
    rx: Receiver<AppEvent>,
    dispatcher: UiDispatcher,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, shutdown: ShutdownHandle) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        let spawned = thread::Builder::new()
            .name("input".to_string())
            .spawn(move || {
                let mut last_tick = Instant::now();
                loop {
                    if shutdown.is_shutting_down() {
                        break;
                    }

                    // Short poll timeout so the shutdown flag is checked often
                    let timeout = tick_rate
                        .saturating_sub(last_tick.elapsed())
                        .min(Duration::from_millis(50));

                    match event::poll(timeout) {
                        Ok(true) => match event::read() {
                            Ok(Event::Key(key)) => {
                                let _ = event_tx.send(AppEvent::Key(key));
                            }
                            Ok(Event::Resize(cols, rows)) => {
                                let _ = event_tx.send(AppEvent::Resize(cols, rows));
                            }
                            Ok(_) => {}
                            Err(err) => {
                                tracing::error!(error = %err, "terminal read failed");
                                break;
                            }
                        },
                        Ok(false) => {}
                        Err(err) => {
                            tracing::error!(error = %err, "terminal poll failed");
                            break;
                        }
                    }

                    if last_tick.elapsed() >= tick_rate {
                        if event_tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                        last_tick = Instant::now();
                    }
                }
                tracing::debug!("input thread stopped");
            });
        if let Err(err) = spawned {
            tracing::error!(error = %err, "failed to spawn input thread");
        }

        Self {
            rx,
            dispatcher: UiDispatcher::new(tx),
        }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn dispatcher(&self) -> UiDispatcher {
        self.dispatcher.clone()
    }
}
