//! Adapter to convert crossterm key events to our Keystroke type

use crossterm::event::{KeyCode as TermKeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::types::{KeyCode, Keystroke, Modifiers};

/// Convert a crossterm key event to a Keystroke
///
/// Returns None for key releases and keys we do not map.
pub fn keystroke_from_crossterm(event: &KeyEvent) -> Option<Keystroke> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let m = event.modifiers;
    let mut mods = Modifiers::new(
        m.contains(KeyModifiers::CONTROL),
        m.contains(KeyModifiers::SHIFT),
        m.contains(KeyModifiers::ALT),
        m.contains(KeyModifiers::SUPER) || m.contains(KeyModifiers::META),
    );

    let key = match event.code {
        TermKeyCode::Char(c) => KeyCode::Char(c),
        TermKeyCode::Enter => KeyCode::Enter,
        TermKeyCode::Esc => KeyCode::Escape,
        TermKeyCode::Tab => KeyCode::Tab,
        TermKeyCode::BackTab => {
            mods = mods | Modifiers::SHIFT;
            KeyCode::Tab
        }
        TermKeyCode::Backspace => KeyCode::Backspace,
        TermKeyCode::Delete => KeyCode::Delete,

        TermKeyCode::Up => KeyCode::Up,
        TermKeyCode::Down => KeyCode::Down,
        TermKeyCode::Left => KeyCode::Left,
        TermKeyCode::Right => KeyCode::Right,

        TermKeyCode::Home => KeyCode::Home,
        TermKeyCode::End => KeyCode::End,
        TermKeyCode::PageUp => KeyCode::PageUp,
        TermKeyCode::PageDown => KeyCode::PageDown,
        TermKeyCode::Insert => KeyCode::Insert,

        TermKeyCode::F(n) => KeyCode::F(n),

        _ => return None,
    };

    Some(Keystroke::new(key, mods))
}
