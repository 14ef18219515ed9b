use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use chartwalk_core::reducer::Key;

/// Maps a terminal key event to session input; `None` for releases and repeats.
pub fn key_from_event(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let key = match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('q') => Key::Quit,
        KeyCode::Up | KeyCode::Char('k') => Key::Up,
        KeyCode::Down | KeyCode::Char('j') => Key::Down,
        KeyCode::Enter | KeyCode::Char(' ') => Key::Select,
        KeyCode::Backspace | KeyCode::Esc => Key::Back,
        KeyCode::Char(c @ '0'..='9') => Key::Digit(c as u8 - b'0'),
        _ => Key::Other,
    };
    Some(key)
}
