//! Reducer for the login screen.

use crate::ui::mvi::Reducer;

use super::intent::LoginIntent;
use super::state::{LoginScreenState, PresenterStatus};

pub struct LoginReducer;

impl Reducer for LoginReducer {
    type State = LoginScreenState;
    type Intent = LoginIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LoginIntent::PresenterReady => LoginScreenState {
                status: PresenterStatus::Ready,
                ..state
            },

            LoginIntent::InitFailed { reason } => LoginScreenState {
                status: PresenterStatus::InitFailed { reason },
                loading: false,
                ..state
            },

            LoginIntent::PresenterClosed => LoginScreenState {
                status: PresenterStatus::Closed,
                loading: false,
                ..state
            },

            LoginIntent::Apply(snapshot) => LoginScreenState {
                phase: snapshot.phase(),
                loading: snapshot.is_loading(),
                error: snapshot.error().map(str::to_string),
                account: snapshot.account().map(str::to_string),
                applied: state.applied + 1,
                ..state
            },

            LoginIntent::HostInput(ch) => {
                if state.loading || ch.is_control() {
                    return state;
                }
                let mut state = state;
                state.host.push(ch);
                state
            }

            LoginIntent::HostBackspace => {
                if state.loading {
                    return state;
                }
                let mut state = state;
                state.host.pop();
                state
            }

            LoginIntent::ClearError => LoginScreenState {
                error: None,
                ..state
            },
        }
    }
}
