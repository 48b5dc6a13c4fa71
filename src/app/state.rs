//! Selection session state and its transition function

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::action::{Action, filter_action, select_action};
use super::input::FilterInput;
use super::message::{Message, Task};
use crate::error::{Error, Result};
use crate::git::{Branch, Switched};
use crate::query::{DEFAULT_PAGE_SIZE, Query, QueryPage, Scope, SortBy, SortDir};

/// How key presses are interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Digits build a number; navigation keys move the cursor
    #[default]
    Select,
    /// Keys edit the filter text
    Filter,
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exit {
    /// The user quit without switching
    Quit,
    /// A branch switch succeeded
    Switched {
        /// The branch now checked out
        branch: String,
        /// The branch checked out before, when known
        previous: Option<String>,
    },
}

/// Parameters a session starts from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Repository to operate on; `None` uses the working directory
    pub repo_path: Option<PathBuf>,
    /// Which branches to list
    pub scope: Scope,
    /// Branches per page; 0 uses the query default
    pub page_size: usize,
    /// Initial filter text
    pub pattern: String,
}

/// State of one interactive selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current input mode
    pub mode: Mode,
    /// Highlighted row within `items`
    pub cursor: usize,
    /// Digits typed in select mode
    pub number_buffer: String,
    /// Filter text widget
    pub filter: FilterInput,
    /// 1-based page most recently requested
    pub page: usize,
    /// 1-based page that `items` came from
    pub shown_page: usize,
    /// Pages reported by the last applied listing
    pub total_pages: usize,
    /// Display text of the most recent error
    pub last_error: Option<String>,
    /// Branches on the current page
    pub items: Vec<Branch>,
    /// Matches across all pages
    pub total: usize,
    /// Which branches are listed
    pub scope: Scope,
    /// Repository to operate on
    pub repo_path: Option<PathBuf>,
    /// Branches per page
    pub page_size: usize,
    /// Label of a switch in flight
    pub pending_switch: Option<String>,
    /// Set once the session is over
    pub exit: Option<Exit>,
    next_query_id: u64,
    applied_query_id: u64,
}

impl Session {
    /// Create a session in select mode on page 1
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        let page_size = if options.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            options.page_size
        };
        Self {
            mode: Mode::Select,
            cursor: 0,
            number_buffer: String::new(),
            filter: FilterInput::new(&options.pattern),
            page: 1,
            shown_page: 1,
            total_pages: 0,
            last_error: None,
            items: Vec::new(),
            total: 0,
            scope: options.scope,
            repo_path: options.repo_path,
            page_size,
            pending_switch: None,
            exit: None,
            next_query_id: 0,
            applied_query_id: 0,
        }
    }

    /// Tasks to run when the session starts: the first listing
    pub fn init(&mut self) -> Vec<Task> {
        vec![self.refresh()]
    }

    /// Whether the session has reached a terminal state
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.exit.is_some()
    }

    /// The query describing the page currently shown
    #[must_use]
    pub fn query(&self) -> Query {
        Query {
            repo_path: self.repo_path.clone(),
            pattern: self.filter.trimmed().to_string(),
            scope: self.scope,
            sort_by: SortBy::Recency,
            sort_dir: SortDir::Desc,
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Apply a message and return the background work it requires
    pub fn update(&mut self, message: Message) -> Vec<Task> {
        match message {
            Message::Input(input) => {
                if self.is_finished() {
                    return Vec::new();
                }
                let action = match self.mode {
                    Mode::Select => select_action(input),
                    Mode::Filter => Some(filter_action(input)),
                };
                action.map_or_else(Vec::new, |action| self.apply(action))
            }
            Message::QueryFinished { id, result } => self.finish_query(id, result),
            Message::SwitchFinished { result } => {
                self.finish_switch(result);
                Vec::new()
            }
        }
    }

    fn apply(&mut self, action: Action) -> Vec<Task> {
        match action {
            Action::Quit => {
                debug!("Quit requested");
                self.exit = Some(Exit::Quit);
            }
            Action::EnterFilter => self.mode = Mode::Filter,
            Action::LeaveFilter => self.mode = Mode::Select,
            Action::PushDigit(digit) => self.number_buffer.push(digit),
            Action::PopDigit => {
                self.number_buffer.pop();
            }
            Action::ClearNumber => self.number_buffer.clear(),
            Action::ClearFilter => {
                self.filter.clear();
                self.page = 1;
                return vec![self.refresh()];
            }
            Action::Submit => return self.submit(),
            Action::CursorUp => {
                self.cursor = self
                    .cursor
                    .checked_sub(1)
                    .unwrap_or_else(|| self.items.len().saturating_sub(1));
            }
            Action::CursorDown => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                } else {
                    self.cursor = 0;
                }
            }
            Action::NextPage => {
                if self.page < self.total_pages.max(1) {
                    self.page += 1;
                }
                self.cursor = 0;
                return vec![self.refresh()];
            }
            Action::PrevPage => {
                if self.page > 1 {
                    self.page -= 1;
                    self.cursor = 0;
                    return vec![self.refresh()];
                }
            }
            Action::Edit(edit) => {
                if self.filter.apply(edit) {
                    self.page = 1;
                    return vec![self.refresh()];
                }
            }
        }
        Vec::new()
    }

    /// Start a switch for the numbered or highlighted branch
    fn submit(&mut self) -> Vec<Task> {
        if let Some(pending) = &self.pending_switch {
            debug!(pending = %pending, "Switch already in flight; ignoring request");
            return Vec::new();
        }

        if self.mode == Mode::Select {
            let digits = std::mem::take(&mut self.number_buffer);
            let digits = digits.trim();
            if !digits.is_empty() {
                return match digits.parse::<usize>() {
                    Ok(position) if position > 0 => {
                        self.pending_switch = Some(format!("#{position}"));
                        vec![Task::Jump {
                            position,
                            query: self.query(),
                        }]
                    }
                    _ => {
                        self.last_error = Some(Error::InvalidSelection.to_string());
                        Vec::new()
                    }
                };
            }
        }

        let Some(branch) = self.items.get(self.cursor) else {
            return Vec::new();
        };
        let name = branch.name.clone();
        self.pending_switch = Some(name.clone());
        vec![Task::Switch {
            repo_path: self.repo_path.clone(),
            name,
        }]
    }

    fn refresh(&mut self) -> Task {
        self.next_query_id += 1;
        Task::Refresh {
            id: self.next_query_id,
            query: self.query(),
        }
    }

    /// Apply a listing, re-requesting the last page when the list shrank under us
    fn finish_query(&mut self, id: u64, result: Result<QueryPage>) -> Vec<Task> {
        if id <= self.applied_query_id {
            debug!(id, applied = self.applied_query_id, "Discarding stale query result");
            return Vec::new();
        }
        self.applied_query_id = id;

        match result {
            Ok(page) => {
                let last_page = page.total_pages().max(1);
                self.total_pages = page.total_pages();
                self.total = page.total;
                self.shown_page = page.page;
                self.items = page.items;
                self.last_error = None;
                if self.cursor >= self.items.len() {
                    self.cursor = self.items.len().saturating_sub(1);
                }

                if self.page > last_page && id == self.next_query_id {
                    debug!(page = self.page, last_page, "Page past the end; clamping");
                    self.page = last_page;
                    self.cursor = 0;
                    return vec![self.refresh()];
                }
            }
            Err(e) => {
                warn!(id, error = %e, "Branch listing failed");
                self.last_error = Some(e.to_string());
                // Stay on the page the items belong to
                self.page = self.shown_page;
            }
        }
        Vec::new()
    }

    fn finish_switch(&mut self, result: Result<Switched>) {
        self.pending_switch = None;
        match result {
            Ok(Switched { branch, previous }) => {
                info!(branch = %branch, "Session finished with a switch");
                self.last_error = None;
                self.exit = Some(Exit::Switched { branch, previous });
            }
            Err(e) => {
                warn!(error = %e, "Switch failed");
                self.last_error = Some(e.to_string());
            }
        }
    }
}
