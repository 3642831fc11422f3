use crate::ui::login::PresenterStatus;
use crate::ui::nav::ScreenState;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK, STATUS_PENDING,
};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header<'a> {
    screen: ScreenState,
    status: &'a PresenterStatus,
}

impl<'a> Header<'a> {
    pub fn new(screen: ScreenState, status: &'a PresenterStatus) -> Self {
        Self { screen, status }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let status_color = match self.status {
            PresenterStatus::Ready => STATUS_OK,
            PresenterStatus::Starting => STATUS_PENDING,
            PresenterStatus::InitFailed { .. } | PresenterStatus::Closed => STATUS_ERROR,
        };
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("●", Style::default().fg(status_color)),
            Span::styled("  ", text_style),
            Span::styled("login-shell", Style::default().fg(ACCENT)),
            Span::styled("  │  ", separator_style),
            Span::styled(self.screen.title(), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(
                format!("presenter: {}", self.status.label()),
                text_style,
            ),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
