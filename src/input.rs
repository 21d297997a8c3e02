use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::capture::SubPhase;
use crate::keystroke::Key;
use crate::session::{Phase, SessionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Session(SessionEvent),
    Quit,
    Ignore,
}

/// Maps a terminal key press to an action for the current phase. Named keys
/// other than Enter, Backspace and Esc are dropped.
pub fn from_key_event(key: &KeyEvent, phase: Phase, sub_phase: SubPhase) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignore;
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        _ if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Action::Ignore
        }
        KeyCode::Enter => match (phase, sub_phase) {
            (Phase::Reveal, _) | (Phase::Typing, SubPhase::Scripted) => {
                Action::Session(SessionEvent::Advance)
            }
            (Phase::Typing, SubPhase::Free) => Action::Session(SessionEvent::Submit),
            (Phase::Reading, _) => Action::Ignore,
        },
        KeyCode::Char('r') if phase == Phase::Reading => Action::Session(SessionEvent::Reset),
        KeyCode::Char('q') if phase == Phase::Reading => Action::Quit,
        KeyCode::Char(c) => Action::Session(SessionEvent::Key(Key::Char(c))),
        KeyCode::Backspace => Action::Session(SessionEvent::Key(Key::Backspace)),
        _ => Action::Ignore,
    }
}

/// Turns a change of a text field's contents into key actions: one backspace
/// per character dropped after the common prefix, then the new characters.
pub fn from_text_delta(previous: &str, current: &str) -> Vec<Key> {
    let common = previous
        .chars()
        .zip(current.chars())
        .take_while(|(a, b)| a == b)
        .count();

    let removed = previous.chars().count() - common;
    std::iter::repeat(Key::Backspace)
        .take(removed)
        .chain(current.chars().skip(common).map(Key::Char))
        .collect()
}

/// Key actions for pasted text. Line breaks and other control characters
/// are dropped.
pub fn from_paste(text: &str) -> Vec<Key> {
    let printable: String = text.chars().filter(|c| !c.is_control()).collect();
    from_text_delta("", &printable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_chars_and_backspace() {
        assert_eq!(
            from_key_event(&press(KeyCode::Char('a')), Phase::Reveal, SubPhase::Scripted),
            Action::Session(SessionEvent::Key(Key::Char('a')))
        );
        assert_eq!(
            from_key_event(&press(KeyCode::Backspace), Phase::Typing, SubPhase::Free),
            Action::Session(SessionEvent::Key(Key::Backspace))
        );
    }

    #[test]
    fn test_named_keys_dropped() {
        for code in [KeyCode::Left, KeyCode::Tab, KeyCode::F(1), KeyCode::Home] {
            assert_eq!(
                from_key_event(&press(code), Phase::Typing, SubPhase::Scripted),
                Action::Ignore
            );
        }
    }

    #[test]
    fn test_enter_depends_on_phase() {
        let enter = press(KeyCode::Enter);
        assert_eq!(
            from_key_event(&enter, Phase::Reveal, SubPhase::Scripted),
            Action::Session(SessionEvent::Advance)
        );
        assert_eq!(
            from_key_event(&enter, Phase::Typing, SubPhase::Scripted),
            Action::Session(SessionEvent::Advance)
        );
        assert_eq!(
            from_key_event(&enter, Phase::Typing, SubPhase::Free),
            Action::Session(SessionEvent::Submit)
        );
        assert_eq!(
            from_key_event(&enter, Phase::Reading, SubPhase::Free),
            Action::Ignore
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            from_key_event(&press(KeyCode::Esc), Phase::Typing, SubPhase::Free),
            Action::Quit
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            from_key_event(&ctrl_c, Phase::Reveal, SubPhase::Scripted),
            Action::Quit
        );
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(
            from_key_event(&ctrl_a, Phase::Reveal, SubPhase::Scripted),
            Action::Ignore
        );
    }

    #[test]
    fn test_reading_shortcuts() {
        assert_eq!(
            from_key_event(&press(KeyCode::Char('r')), Phase::Reading, SubPhase::Free),
            Action::Session(SessionEvent::Reset)
        );
        assert_eq!(
            from_key_event(&press(KeyCode::Char('q')), Phase::Reading, SubPhase::Free),
            Action::Quit
        );
        // plain letters while typing
        assert_eq!(
            from_key_event(&press(KeyCode::Char('r')), Phase::Typing, SubPhase::Free),
            Action::Session(SessionEvent::Key(Key::Char('r')))
        );
    }

    #[test]
    fn test_uppercase_with_shift_is_a_char() {
        let shifted = KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT);
        assert_eq!(
            from_key_event(&shifted, Phase::Typing, SubPhase::Scripted),
            Action::Session(SessionEvent::Key(Key::Char('T')))
        );
    }

    #[test]
    fn test_text_delta_append() {
        assert_eq!(
            from_text_delta("ab", "abc"),
            vec![Key::Char('c')]
        );
        assert_eq!(
            from_text_delta("", "hi"),
            vec![Key::Char('h'), Key::Char('i')]
        );
    }

    #[test]
    fn test_text_delta_delete_and_replace() {
        assert_eq!(from_text_delta("abc", "ab"), vec![Key::Backspace]);
        assert_eq!(
            from_text_delta("abc", "axy"),
            vec![Key::Backspace, Key::Backspace, Key::Char('x'), Key::Char('y')]
        );
        assert!(from_text_delta("same", "same").is_empty());
    }

    #[test]
    fn test_from_paste_drops_control_chars() {
        assert_eq!(
            from_paste("a b\r\n\tc"),
            vec![Key::Char('a'), Key::Char(' '), Key::Char('b'), Key::Char('c')]
        );
        assert!(from_paste("\n").is_empty());
    }
}
