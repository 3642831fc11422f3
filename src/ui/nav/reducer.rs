use crate::ui::mvi::Reducer;

use super::intent::NavIntent;
use super::state::ScreenState;

/// Home is terminal: once there, further `ToHome` intents change nothing.
pub struct NavReducer;

impl Reducer for NavReducer {
    type State = ScreenState;
    type Intent = NavIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (ScreenState::Login, NavIntent::ToHome) => ScreenState::Home,
            (ScreenState::Home, NavIntent::ToHome) => ScreenState::Home,
        }
    }
}
