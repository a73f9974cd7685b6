//! Terminal-independent key input, so the form can be driven from tests.

use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    /// Anything the form has no binding for
    Other,
}

/// A key press with the modifiers the form cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
        }
    }

    pub fn with_ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::new(key)
        }
    }

    /// Ctrl or Alt held: never text input
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            _ => Key::Other,
        }
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(event: CrosstermKeyEvent) -> Self {
        Self {
            key: event.code.into(),
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossterm_events_keep_ctrl_modifier() {
        let event = KeyEvent::from(CrosstermKeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ));

        assert_eq!(event, KeyEvent::with_ctrl(Key::Char('c')));
        assert!(event.is_chord());
    }

    #[test]
    fn shift_alone_is_plain_text() {
        let event = KeyEvent::from(CrosstermKeyEvent::new(
            KeyCode::Char('A'),
            KeyModifiers::SHIFT,
        ));

        assert_eq!(event, KeyEvent::new(Key::Char('A')));
    }

    #[test]
    fn unbound_keys_map_to_other() {
        assert_eq!(Key::from(KeyCode::F(5)), Key::Other);
        assert_eq!(Key::from(KeyCode::BackTab), Key::BackTab);
    }
}
