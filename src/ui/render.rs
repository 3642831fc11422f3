use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::login::{LoginScreenState, PresenterStatus};
use crate::ui::nav::ScreenState;
use crate::ui::theme::{ACCENT, FIELD_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const FORM_WIDTH: u16 = 56;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let view = app.view();
    let login = view.state();

    frame.render_widget(Header::new(view.screen(), &login.status).widget(), header);
    frame.render_widget(Clear, body);

    let (title, lines) = match view.screen() {
        ScreenState::Home => ("Home", home_lines(login)),
        ScreenState::Login => match &login.status {
            PresenterStatus::InitFailed { reason } => {
                ("Sign in unavailable", init_failed_lines(reason))
            }
            _ => ("Sign in", login_lines(login, app.spinner_frame())),
        },
    };
    draw_panel(frame, body, title, lines);

    let footer_widget = Footer::new(view.screen(), login, view.errors().latest());
    frame.render_widget(footer_widget.widget(footer), footer);
}

fn draw_panel(frame: &mut Frame<'_>, body: Rect, title: &'static str, lines: Vec<Line<'static>>) {
    let height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect_by_size(body, FORM_WIDTH, height);
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(FIELD_BORDER));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn login_lines(login: &LoginScreenState, spinner: &'static str) -> Vec<Line<'static>> {
    let text = Style::default().fg(HEADER_TEXT);
    let mut lines = vec![
        Line::from(Span::styled("Server host or callback URL:", text)),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT)),
            Span::styled(login.host.clone(), text.add_modifier(Modifier::BOLD)),
            Span::styled("_", text.add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(""),
    ];

    if login.loading {
        lines.push(Line::from(vec![
            Span::styled(spinner, Style::default().fg(ACCENT)),
            Span::styled(" Signing in...", text),
        ]));
    } else if let Some(error) = &login.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(STATUS_ERROR),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("Status: {}", login.phase.label()),
            text.add_modifier(Modifier::DIM),
        )));
    }
    lines
}

fn init_failed_lines(reason: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Cannot start login",
            Style::default()
                .fg(STATUS_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            reason.to_string(),
            Style::default().fg(HEADER_TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press R to retry.",
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
        )),
    ]
}

fn home_lines(login: &LoginScreenState) -> Vec<Line<'static>> {
    let account = login.account.clone().unwrap_or_else(|| "signed in".to_string());
    vec![
        Line::from(Span::styled("Welcome", Style::default().fg(STATUS_OK)))
            .alignment(Alignment::Center),
        Line::from(Span::styled(account, Style::default().fg(HEADER_TEXT)))
            .alignment(Alignment::Center),
    ]
}
