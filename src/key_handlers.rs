use crate::chat_view::ChatView;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const PAGE_LINES: usize = 5;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Send(String),
    Quit,
}

pub fn handle_chat_input(key: KeyEvent, view: &mut ChatView) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    match key.code {
        KeyCode::Esc => return Action::Quit,
        KeyCode::Enter => {
            if let Some(text) = view.submit() {
                return Action::Send(text);
            }
        }
        KeyCode::PageUp => view.scroll_up(PAGE_LINES),
        KeyCode::PageDown => view.scroll_down(PAGE_LINES),
        KeyCode::End => view.scroll_to_bottom(),
        KeyCode::Backspace => view.pop_char(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => return Action::Quit,
                    'u' => view.scroll_up(PAGE_LINES),
                    'd' => view.scroll_down(PAGE_LINES),
                    _ => {}
                }
            } else {
                view.push_char(c);
            }
        }
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_GREETING;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_and_enter_sends() {
        let mut view = ChatView::new(DEFAULT_GREETING);
        for c in "play jazz".chars() {
            assert_eq!(handle_chat_input(press(KeyCode::Char(c)), &mut view), Action::None);
        }
        assert_eq!(
            handle_chat_input(press(KeyCode::Enter), &mut view),
            Action::Send("play jazz".to_string())
        );
        assert!(view.is_in_flight());
    }

    #[test]
    fn test_enter_on_blank_input_does_nothing() {
        let mut view = ChatView::new(DEFAULT_GREETING);
        handle_chat_input(press(KeyCode::Char(' ')), &mut view);
        assert_eq!(handle_chat_input(press(KeyCode::Enter), &mut view), Action::None);
        assert_eq!(view.render_messages().len(), 1);
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut view = ChatView::new(DEFAULT_GREETING);
        handle_chat_input(press(KeyCode::Char('h')), &mut view);
        handle_chat_input(press(KeyCode::Char('i')), &mut view);
        handle_chat_input(press(KeyCode::Backspace), &mut view);
        assert_eq!(view.input(), "h");
    }

    #[test]
    fn test_quit_keys() {
        let mut view = ChatView::new(DEFAULT_GREETING);
        assert_eq!(handle_chat_input(press(KeyCode::Esc), &mut view), Action::Quit);
        assert_eq!(handle_chat_input(ctrl('c'), &mut view), Action::Quit);
    }

    #[test]
    fn test_control_chars_are_not_typed() {
        let mut view = ChatView::new(DEFAULT_GREETING);
        handle_chat_input(ctrl('u'), &mut view);
        handle_chat_input(ctrl('d'), &mut view);
        assert_eq!(view.input(), "");
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut view = ChatView::new(DEFAULT_GREETING);
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        handle_chat_input(key, &mut view);
        assert_eq!(view.input(), "");
    }
}
