//! Per-mode key tables
//!
//! Each mode maps an [`Input`] to an [`Action`] with a plain lookup; the
//! session decides what an action does given its current state.

use super::input::Edit;
use super::message::Input;

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the session without switching
    Quit,
    /// Start editing the filter
    EnterFilter,
    /// Stop editing the filter
    LeaveFilter,
    /// Append a digit to the number buffer
    PushDigit(char),
    /// Drop the last digit of the number buffer
    PopDigit,
    /// Empty the number buffer
    ClearNumber,
    /// Empty the filter and refresh
    ClearFilter,
    /// Switch to the numbered or highlighted branch
    Submit,
    /// Move the cursor up, wrapping to the bottom
    CursorUp,
    /// Move the cursor down, wrapping to the top
    CursorDown,
    /// Show the next page
    NextPage,
    /// Show the previous page
    PrevPage,
    /// Edit the filter text
    Edit(Edit),
}

/// Look up a key in select mode; unbound keys yield `None`
#[must_use]
pub const fn select_action(input: Input) -> Option<Action> {
    let action = match input {
        Input::Interrupt | Input::Char('q') => Action::Quit,
        Input::Char('f') => Action::EnterFilter,
        Input::Char(c) if c.is_ascii_digit() => Action::PushDigit(c),
        Input::Backspace => Action::PopDigit,
        Input::Tab => Action::ClearNumber,
        Input::Enter => Action::Submit,
        Input::Up | Input::Char('k') => Action::CursorUp,
        Input::Down | Input::Char('j') => Action::CursorDown,
        Input::PageDown | Input::Right | Input::Char('n') => Action::NextPage,
        Input::PageUp | Input::Left | Input::Char('p') => Action::PrevPage,
        _ => return None,
    };
    Some(action)
}

/// Look up a key in filter mode; everything not bound edits the text
#[must_use]
pub const fn filter_action(input: Input) -> Action {
    match input {
        Input::Interrupt => Action::Quit,
        Input::Esc | Input::Char('f') => Action::LeaveFilter,
        Input::Tab => Action::ClearFilter,
        Input::Enter => Action::Submit,
        Input::Up => Action::CursorUp,
        Input::Down => Action::CursorDown,
        Input::PageDown => Action::NextPage,
        Input::PageUp => Action::PrevPage,
        Input::Char(c) => Action::Edit(Edit::Insert(c)),
        Input::Backspace => Action::Edit(Edit::Backspace),
        Input::Delete => Action::Edit(Edit::Delete),
        Input::Left => Action::Edit(Edit::Left),
        Input::Right => Action::Edit(Edit::Right),
        Input::Home => Action::Edit(Edit::Home),
        Input::End => Action::Edit(Edit::End),
        Input::DeleteWord => Action::Edit(Edit::DeleteWord),
        Input::ClearLine => Action::Edit(Edit::ClearLine),
    }
}
