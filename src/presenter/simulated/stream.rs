use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::presenter::state::LoginState;

const STREAM_BUFFER: usize = 64;

/// Hot state stream: always has a current value, replays it to new
/// subscribers, and forwards every later emission in order.
pub struct StateStream {
    current: Mutex<LoginState>,
    sender: broadcast::Sender<LoginState>,
}

impl StateStream {
    pub fn new(initial: LoginState) -> Self {
        let (sender, _) = broadcast::channel(STREAM_BUFFER);
        Self {
            current: Mutex::new(initial),
            sender,
        }
    }

    pub fn emit(&self, state: LoginState) {
        let mut current = self.current.lock();
        *current = state.clone();
        // No subscriber is fine: the value is kept as `current`.
        let _ = self.sender.send(state);
    }

    /// Current value plus a receiver for everything emitted afterwards.
    ///
    /// Both are taken under the same lock as `emit`, so nothing is missed or
    /// duplicated between the replay and the first received value.
    pub fn subscribe(&self) -> (LoginState, broadcast::Receiver<LoginState>) {
        let current = self.current.lock();
        (current.clone(), self.sender.subscribe())
    }
}
