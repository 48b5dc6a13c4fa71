//! Single-line text input used for the filter pattern

use serde::{Deserialize, Serialize};

/// An editing operation on a [`FilterInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Insert a character at the caret
    Insert(char),
    /// Delete the character before the caret
    Backspace,
    /// Delete the character at the caret
    Delete,
    /// Move the caret one character left
    Left,
    /// Move the caret one character right
    Right,
    /// Move the caret to the start
    Home,
    /// Move the caret to the end
    End,
    /// Delete the word before the caret
    DeleteWord,
    /// Delete everything
    ClearLine,
}

/// Filter text plus a caret
///
/// The caret is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredInput")]
pub struct FilterInput {
    text: String,
    cursor: usize,
}

/// Serialized form, checked on the way in
#[derive(Deserialize)]
struct StoredInput {
    text: String,
    cursor: usize,
}

impl From<StoredInput> for FilterInput {
    fn from(stored: StoredInput) -> Self {
        let end = stored.cursor.min(stored.text.len());
        let cursor = (0..=end)
            .rev()
            .find(|&i| stored.text.is_char_boundary(i))
            .unwrap_or(0);
        Self {
            text: stored.text,
            cursor,
        }
    }
}

impl FilterInput {
    /// Create an input holding `text` with the caret at the end
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    /// The current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caret position counted in characters, for display
    #[must_use]
    pub fn caret(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// The text with surrounding whitespace removed
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Apply an edit, returning whether the text changed
    pub fn apply(&mut self, edit: Edit) -> bool {
        let before = self.text.len();
        match edit {
            Edit::Insert(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                return true;
            }
            Edit::Backspace => self.backspace(),
            Edit::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
            }
            Edit::Left => self.cursor = self.prev_boundary(),
            Edit::Right => self.cursor = self.next_boundary(),
            Edit::Home => self.cursor = 0,
            Edit::End => self.cursor = self.text.len(),
            Edit::DeleteWord => self.delete_word(),
            Edit::ClearLine => self.clear(),
        }
        self.text.len() != before
    }

    /// Remove all text
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    fn delete_word(&mut self) {
        let head = &self.text[..self.cursor];
        let trimmed = head.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }
}
