//! Key translation and the hint tables shown in the footer

use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use crate::app::Input;

/// A key (or group of keys) and what it does, for the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    /// Display text for the key(s)
    pub keys: &'static str,
    /// Short description of the effect
    pub description: &'static str,
}

impl KeyHint {
    const fn new(keys: &'static str, description: &'static str) -> Self {
        Self { keys, description }
    }
}

/// Hints shown while selecting
pub const SELECT_HINTS: &[KeyHint] = &[
    KeyHint::new("↑/k ↓/j", "move"),
    KeyHint::new("←/p →/n", "page"),
    KeyHint::new("0-9", "number"),
    KeyHint::new("enter", "switch"),
    KeyHint::new("f", "filter"),
    KeyHint::new("tab", "clear number"),
    KeyHint::new("q", "quit"),
];

/// Hints shown while typing a filter
pub const FILTER_HINTS: &[KeyHint] = &[
    KeyHint::new("type", "filter"),
    KeyHint::new("↑/↓", "move"),
    KeyHint::new("pgup/pgdn", "page"),
    KeyHint::new("enter", "switch"),
    KeyHint::new("esc/f", "done"),
    KeyHint::new("tab", "clear filter"),
    KeyHint::new("ctrl+c", "quit"),
];

/// Translate a terminal key event into an [`Input`]
///
/// Returns `None` for keys the application never reacts to, including
/// control combinations other than Ctrl+C, Ctrl+W and Ctrl+U.
#[must_use]
pub fn input_from_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Input> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c' | 'C') => Some(Input::Interrupt),
            KeyCode::Char('w' | 'W') => Some(Input::DeleteWord),
            KeyCode::Char('u' | 'U') => Some(Input::ClearLine),
            _ => None,
        };
    }
    if modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    let input = match code {
        KeyCode::Char(c) => Input::Char(c),
        KeyCode::Enter => Input::Enter,
        KeyCode::Backspace => Input::Backspace,
        KeyCode::Delete => Input::Delete,
        KeyCode::Left => Input::Left,
        KeyCode::Right => Input::Right,
        KeyCode::Up => Input::Up,
        KeyCode::Down => Input::Down,
        KeyCode::Home => Input::Home,
        KeyCode::End => Input::End,
        KeyCode::PageUp => Input::PageUp,
        KeyCode::PageDown => Input::PageDown,
        KeyCode::Tab => Input::Tab,
        KeyCode::Esc => Input::Esc,
        _ => return None,
    };
    Some(input)
}

/// Render a hint table as a single footer line
#[must_use]
pub fn format_hints(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|hint| format!("{} {}", hint.keys, hint.description))
        .collect::<Vec<_>>()
        .join(" • ")
}
