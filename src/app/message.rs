//! Inputs, messages and background tasks exchanged with the session

use std::path::PathBuf;

use crate::error::Result;
use crate::git::Switched;
use crate::query::{Query, QueryPage};

/// A key press after translation from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A printable character
    Char(char),
    /// Enter / Return
    Enter,
    /// Backspace
    Backspace,
    /// Forward delete
    Delete,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home
    Home,
    /// End
    End,
    /// Page Up
    PageUp,
    /// Page Down
    PageDown,
    /// Tab
    Tab,
    /// Escape
    Esc,
    /// Ctrl+C
    Interrupt,
    /// Ctrl+W
    DeleteWord,
    /// Ctrl+U
    ClearLine,
}

/// Everything that can drive a session transition
#[derive(Debug)]
pub enum Message {
    /// A key press
    Input(Input),
    /// A branch listing completed
    QueryFinished {
        /// Request id handed out with the matching [`Task::Refresh`]
        id: u64,
        /// The page or the listing error
        result: Result<QueryPage>,
    },
    /// A switch (direct or by number) completed
    SwitchFinished {
        /// The switch outcome
        result: Result<Switched>,
    },
}

/// Background work requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// List the page described by `query`
    Refresh {
        /// Request id to echo back in [`Message::QueryFinished`]
        id: u64,
        /// What to list
        query: Query,
    },
    /// Switch to a branch by name
    Switch {
        /// Repository to operate on
        repo_path: Option<PathBuf>,
        /// Short branch name
        name: String,
    },
    /// Resolve a 1-based position under `query`, then switch to it
    Jump {
        /// 1-based position across all pages
        position: usize,
        /// Filter, scope and page size to resolve against
        query: Query,
    },
}
