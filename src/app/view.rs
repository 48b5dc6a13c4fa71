//! Render-ready projection of a session

use chrono::{DateTime, FixedOffset};

use super::state::{Mode, Session};
use crate::config::KeyHint;
use crate::config::keys::{FILTER_HINTS, SELECT_HINTS};

/// One numbered line of the branch list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position across all pages
    pub number: usize,
    /// Short branch name
    pub name: String,
    /// Whether this is the checked-out branch
    pub is_current: bool,
    /// Whether the cursor is on this row
    pub is_cursor: bool,
    /// Whether this is a remote-tracking branch
    pub is_remote: bool,
    /// Abbreviated tip commit id
    pub short_sha: Option<String>,
    /// Tip commit subject
    pub subject: Option<String>,
    /// Tip commit time
    pub committed_at: Option<DateTime<FixedOffset>>,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Input mode
    pub mode: Mode,
    /// Filter text in filter mode, number buffer in select mode
    pub prompt: String,
    /// Caret position within `prompt`, in characters; filter mode only
    pub caret: Option<usize>,
    /// Error line
    pub error: Option<String>,
    /// Status line, e.g. a switch in flight
    pub status: Option<String>,
    /// Branches on the current page
    pub rows: Vec<Row>,
    /// 1-based page the rows belong to
    pub page: usize,
    /// Number of pages, at least 1
    pub total_pages: usize,
    /// Matches across all pages
    pub total: usize,
    /// Footer key hints for the mode
    pub hints: &'static [KeyHint],
}

impl Session {
    /// Project the session into a [`View`]
    #[must_use]
    pub fn view(&self) -> View {
        let offset = (self.shown_page.max(1) - 1) * self.page_size;
        let rows = self
            .items
            .iter()
            .enumerate()
            .map(|(i, branch)| Row {
                number: offset + i + 1,
                name: branch.name.clone(),
                is_current: branch.is_current,
                is_cursor: i == self.cursor,
                is_remote: branch.is_remote,
                short_sha: branch.short_sha().map(str::to_string),
                subject: branch.last_commit_message.clone(),
                committed_at: branch.head_commit_at,
            })
            .collect();

        let (prompt, caret, hints) = match self.mode {
            Mode::Select => (self.number_buffer.clone(), None, SELECT_HINTS),
            Mode::Filter => (
                self.filter.text().to_string(),
                Some(self.filter.caret()),
                FILTER_HINTS,
            ),
        };

        View {
            mode: self.mode,
            prompt,
            caret,
            error: self.last_error.clone(),
            status: self
                .pending_switch
                .as_ref()
                .map(|target| format!("Switching to {target}…")),
            rows,
            page: self.shown_page,
            total_pages: self.total_pages.max(1),
            total: self.total,
            hints,
        }
    }
}
