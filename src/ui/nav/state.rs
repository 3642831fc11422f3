use crate::ui::mvi::UiState;

/// Which screen the shell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenState {
    #[default]
    Login,
    Home,
}

impl UiState for ScreenState {}

impl ScreenState {
    pub fn title(&self) -> &'static str {
        match self {
            ScreenState::Login => "Sign in",
            ScreenState::Home => "Home",
        }
    }
}
