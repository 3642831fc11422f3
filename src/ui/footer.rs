use crate::error::ErrorEntry;
use crate::ui::login::LoginScreenState;
use crate::ui::nav::ScreenState;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer<'a> {
    screen: ScreenState,
    login: &'a LoginScreenState,
    latest_error: Option<ErrorEntry>,
}

impl<'a> Footer<'a> {
    pub fn new(
        screen: ScreenState,
        login: &'a LoginScreenState,
        latest_error: Option<ErrorEntry>,
    ) -> Self {
        Self {
            screen,
            login,
            latest_error,
        }
    }

    pub fn hints(&self) -> &'static str {
        match self.screen {
            ScreenState::Home => " Esc: Quit │ Ctrl+Q: Quit",
            ScreenState::Login if self.login.is_init_failed() => " R: Retry │ Ctrl+Q: Quit",
            ScreenState::Login => " Enter: Sign in │ Esc: Clear error │ Ctrl+Q: Quit",
        }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let hints = self.hints();
        let error = self
            .latest_error
            .as_ref()
            .map(|entry| format!(" │ {}: {}", entry.category.label(), entry.message))
            .unwrap_or_default();
        let version = format!("v{} ", VERSION);

        // Padding by char count, not byte count
        let content_width = area.width.saturating_sub(2) as usize;
        let used = hints.chars().count() + version.chars().count();
        let error: String = error
            .chars()
            .take(content_width.saturating_sub(used))
            .collect();
        let padding = content_width
            .saturating_sub(used)
            .saturating_sub(error.chars().count());

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(error, Style::default().fg(STATUS_ERROR)),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
