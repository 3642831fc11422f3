use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    /// Presenter reported a completed login.
    ToHome,
}

impl Intent for NavIntent {}
