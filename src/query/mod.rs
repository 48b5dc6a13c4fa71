//! Branch query engine: scope selection, filtering, sorting and pagination


use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::git::{Branch, RefNamespace, RefSource, mark_current, parse_for_each_ref};

/// Page size used when a query asks for zero items per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Which partition of refs a query considers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Local branches only
    #[default]
    Local,
    /// Remote-tracking branches only
    Remote,
    /// Local and remote-tracking branches
    All,
}

impl Scope {
    /// Ref namespaces to list for this scope, local first
    #[must_use]
    pub const fn namespaces(self) -> &'static [RefNamespace] {
        match self {
            Self::Local => &[RefNamespace::Heads],
            Self::Remote => &[RefNamespace::Remotes],
            Self::All => &[RefNamespace::Heads, RefNamespace::Remotes],
        }
    }

    /// The flag spelling of this scope
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            "all" => Ok(Self::All),
            other => Err(Error::InvalidScope(other.to_string())),
        }
    }
}

/// Sort key for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Lexicographic by short name
    Name,
    /// By tip commit date; branches without a date count as oldest
    #[default]
    Recency,
}

/// Sort direction for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}

/// Parameters of a branch listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Repository to query; `None` uses the process working directory
    pub repo_path: Option<PathBuf>,
    /// Case-insensitive substring filter on branch names; empty keeps all
    pub pattern: String,
    /// Which refs to include
    pub scope: Scope,
    /// Sort key
    pub sort_by: SortBy,
    /// Sort direction
    pub sort_dir: SortDir,
    /// 1-based page number; 0 is treated as 1
    pub page: usize,
    /// Items per page; 0 is treated as [`DEFAULT_PAGE_SIZE`]
    pub page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            repo_path: None,
            pattern: String::new(),
            scope: Scope::default(),
            sort_by: SortBy::default(),
            sort_dir: SortDir::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Query {
    /// Coerce out-of-range page parameters to their defaults
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.page == 0 {
            self.page = 1;
        }
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }

    /// The repository directory, if one was given
    #[must_use]
    pub fn repo(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

/// One page of a branch listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPage {
    /// Branches on the requested page, in sort order
    pub items: Vec<Branch>,
    /// The 1-based page that was requested
    pub page: usize,
    /// Items per page used for slicing
    pub page_size: usize,
    /// Matches across all pages, after filtering
    pub total: usize,
    /// Whether a page precedes this one
    pub has_prev: bool,
    /// Whether matches remain after this page
    pub has_next: bool,
}

impl QueryPage {
    /// Number of pages needed to show every match
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }
}

/// List branches from `source`, then filter, sort and paginate them
///
/// The current branch is marked on a best-effort basis: a detached HEAD or a
/// failed lookup only skips the marking.
///
/// # Errors
///
/// Returns an error if listing any ref namespace in scope fails
pub fn list_branches<S: RefSource + ?Sized>(source: &S, query: &Query) -> Result<QueryPage> {
    let query = query.clone().normalized();
    let repo = query.repo();

    let mut branches = Vec::new();
    for &namespace in query.scope.namespaces() {
        let raw = source.list_refs(repo, namespace)?;
        branches.extend(parse_for_each_ref(&raw, namespace));
    }

    match source.current_branch(repo) {
        Ok(current) => mark_current(&mut branches, &current),
        Err(e) if e.is_detached_head() => debug!("Detached HEAD; no current branch to mark"),
        Err(e) => warn!(error = %e, "Could not determine current branch"),
    }

    Ok(select_page(branches, &query))
}

/// Apply the filter, sort and pagination of `query` to an already-listed set
#[must_use]
pub fn select_page(mut branches: Vec<Branch>, query: &Query) -> QueryPage {
    let query = query.clone().normalized();

    if !query.pattern.is_empty() {
        let needle = query.pattern.to_lowercase();
        branches.retain(|b| b.name.to_lowercase().contains(&needle));
    }

    sort_branches(&mut branches, query.sort_by, query.sort_dir);

    let total = branches.len();
    let start = (query.page - 1).saturating_mul(query.page_size).min(total);
    let end = start.saturating_add(query.page_size).min(total);
    let items = branches.drain(start..end).collect();

    QueryPage {
        items,
        page: query.page,
        page_size: query.page_size,
        total,
        has_prev: query.page > 1,
        has_next: end < total,
    }
}

/// Stable sort by the requested key
fn sort_branches(branches: &mut [Branch], sort_by: SortBy, sort_dir: SortDir) {
    let key = |a: &Branch, b: &Branch| -> Ordering {
        match sort_by {
            SortBy::Name => a.name.cmp(&b.name),
            // `None` orders before any timestamp, so undated branches are oldest
            SortBy::Recency => a.head_commit_at.cmp(&b.head_commit_at),
        }
    };

    match sort_dir {
        SortDir::Asc => branches.sort_by(key),
        SortDir::Desc => branches.sort_by(|a, b| key(b, a)),
    }
}

/// Find the branch at a 1-based position across all pages of `query`
///
/// Only the page holding `position` is fetched. The `page` of `query` is
/// ignored; its filter, scope, sort and page size are honoured.
///
/// # Errors
///
/// Returns [`Error::InvalidSelection`] for position 0,
/// [`Error::OutOfRange`] when fewer than `position` branches match, or the
/// listing error
pub fn locate<S: RefSource + ?Sized>(source: &S, query: &Query, position: usize) -> Result<Branch> {
    let Some(index) = position.checked_sub(1) else {
        return Err(Error::InvalidSelection);
    };

    let mut query = query.clone().normalized();
    query.page = index / query.page_size + 1;
    let offset = index % query.page_size;

    let page = list_branches(source, &query)?;
    let total = page.total;
    page.items
        .into_iter()
        .nth(offset)
        .ok_or(Error::OutOfRange {
            requested: position,
            total,
        })
}
