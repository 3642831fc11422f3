use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::login::LoginScreenState;
use crate::ui::nav::ScreenState;
use crate::view::UserAction;

/// What the UI loop should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Quit,
    Action(UserAction),
}

pub fn handle_key(
    key: KeyEvent,
    screen: ScreenState,
    login: &LoginScreenState,
) -> Option<InputCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Raw mode delivers Ctrl+C as a key, not a signal
    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        return Some(InputCommand::Quit);
    }

    if screen == ScreenState::Home {
        return match key.code {
            KeyCode::Esc => Some(InputCommand::Quit),
            _ => None,
        };
    }

    if is_ctrl_char(key, 'r') {
        return Some(InputCommand::Action(UserAction::Retry));
    }

    if login.is_init_failed() {
        return match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(InputCommand::Action(UserAction::Retry))
            }
            KeyCode::Esc => Some(InputCommand::Action(UserAction::ClearError)),
            _ => None,
        };
    }

    if key.code == KeyCode::Esc {
        return Some(InputCommand::Action(UserAction::ClearError));
    }
    if !login.accepts_input() {
        return None;
    }

    let action = match key.code {
        KeyCode::Enter => UserAction::Submit,
        KeyCode::Backspace => UserAction::HostBackspace,
        KeyCode::Char(ch) if !has_command_modifier(key) => UserAction::HostInput(ch),
        _ => return None,
    };
    Some(InputCommand::Action(action))
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}

fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::login::PresenterStatus;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn ready() -> LoginScreenState {
        LoginScreenState {
            status: PresenterStatus::Ready,
            ..LoginScreenState::default()
        }
    }

    fn init_failed() -> LoginScreenState {
        LoginScreenState {
            status: PresenterStatus::InitFailed {
                reason: "x".to_string(),
            },
            ..LoginScreenState::default()
        }
    }

    #[test]
    fn ctrl_q_quits_everywhere() {
        assert_eq!(
            handle_key(ctrl('q'), ScreenState::Login, &ready()),
            Some(InputCommand::Quit)
        );
        assert_eq!(
            handle_key(ctrl('q'), ScreenState::Home, &ready()),
            Some(InputCommand::Quit)
        );
    }

    #[test]
    fn ctrl_c_quits_like_ctrl_q() {
        assert_eq!(
            handle_key(ctrl('c'), ScreenState::Login, &ready()),
            Some(InputCommand::Quit)
        );
        assert_eq!(
            handle_key(ctrl('c'), ScreenState::Home, &ready()),
            Some(InputCommand::Quit)
        );
        assert_eq!(
            handle_key(ctrl('c'), ScreenState::Login, &init_failed()),
            Some(InputCommand::Quit)
        );
    }

    #[test]
    fn editing_keys_ignored_while_loading() {
        let loading = LoginScreenState {
            loading: true,
            ..ready()
        };
        assert_eq!(
            handle_key(press(KeyCode::Char('a')), ScreenState::Login, &loading),
            None
        );
        assert_eq!(
            handle_key(press(KeyCode::Enter), ScreenState::Login, &loading),
            None
        );
        assert_eq!(
            handle_key(press(KeyCode::Esc), ScreenState::Login, &loading),
            Some(InputCommand::Action(UserAction::ClearError))
        );
    }

    #[test]
    fn esc_quits_home_but_clears_error_on_login() {
        assert_eq!(
            handle_key(press(KeyCode::Esc), ScreenState::Home, &ready()),
            Some(InputCommand::Quit)
        );
        assert_eq!(
            handle_key(press(KeyCode::Esc), ScreenState::Login, &ready()),
            Some(InputCommand::Action(UserAction::ClearError))
        );
    }

    #[test]
    fn login_keys_edit_and_submit() {
        let login = ready();
        assert_eq!(
            handle_key(press(KeyCode::Char('r')), ScreenState::Login, &login),
            Some(InputCommand::Action(UserAction::HostInput('r')))
        );
        assert_eq!(
            handle_key(press(KeyCode::Backspace), ScreenState::Login, &login),
            Some(InputCommand::Action(UserAction::HostBackspace))
        );
        assert_eq!(
            handle_key(press(KeyCode::Enter), ScreenState::Login, &login),
            Some(InputCommand::Action(UserAction::Submit))
        );
        assert_eq!(handle_key(ctrl('x'), ScreenState::Login, &login), None);
    }

    #[test]
    fn r_retries_only_after_init_failure() {
        assert_eq!(
            handle_key(press(KeyCode::Char('r')), ScreenState::Login, &init_failed()),
            Some(InputCommand::Action(UserAction::Retry))
        );
        assert_eq!(
            handle_key(ctrl('r'), ScreenState::Login, &ready()),
            Some(InputCommand::Action(UserAction::Retry))
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('a')), ScreenState::Login, &init_failed()),
            None
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key(key, ScreenState::Login, &ready()), None);
    }
}
