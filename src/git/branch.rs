//! Branch model and `git for-each-ref` parsing

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RefNamespace;

/// A local or remote-tracking branch, normalized from ref metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Short name, e.g. `feature/x` or `origin/feature/x`
    pub name: String,
    /// Fully-qualified ref, e.g. `refs/heads/feature/x`
    pub full_ref: String,
    /// Whether the working tree has this branch checked out (never set for remotes)
    pub is_current: bool,
    /// Whether this is a remote-tracking branch
    pub is_remote: bool,
    /// Object id of the tip commit
    pub head_commit_sha: Option<String>,
    /// Committer date of the tip commit, absent when git's date did not parse
    pub head_commit_at: Option<DateTime<FixedOffset>>,
    /// Subject line of the tip commit
    pub last_commit_message: Option<String>,
    /// Upstream tracking ref (not populated by the git ref source)
    pub upstream: Option<String>,
}

impl Branch {
    /// Abbreviated tip commit id for display
    #[must_use]
    pub fn short_sha(&self) -> Option<&str> {
        self.head_commit_sha
            .as_deref()
            .map(|sha| sha.get(..7).unwrap_or(sha))
    }
}

/// Parse the output of `git for-each-ref` run with [`super::FOR_EACH_REF_FORMAT`]
///
/// Lines carry four tab-separated fields: refname, object name, committer date
/// and subject. Blank lines and lines with fewer than four fields are skipped,
/// and a date that is not strict RFC 3339 leaves `head_commit_at` empty.
#[must_use]
pub fn parse_for_each_ref(raw: &str, namespace: RefNamespace) -> Vec<Branch> {
    let is_remote = namespace.is_remote();
    let prefix = namespace.prefix();

    let branches: Vec<Branch> = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut fields = line.splitn(4, '\t');
            let full_ref = fields.next()?;
            let sha = fields.next()?;
            let date = fields.next()?;
            let subject = fields.next()?;

            let name = full_ref.strip_prefix(prefix).unwrap_or(full_ref);

            Some(Branch {
                name: name.to_string(),
                full_ref: full_ref.to_string(),
                is_current: false,
                is_remote,
                head_commit_sha: Some(sha.to_string()),
                head_commit_at: DateTime::parse_from_rfc3339(date).ok(),
                last_commit_message: Some(subject.to_string()),
                upstream: None,
            })
        })
        .collect();

    debug!(namespace = %prefix, count = branches.len(), "Parsed refs");
    branches
}

/// Mark every local branch named `current` as checked out
///
/// Remote-tracking entries are never marked, even when their short name
/// matches textually.
pub fn mark_current(branches: &mut [Branch], current: &str) {
    for branch in branches
        .iter_mut()
        .filter(|b| !b.is_remote && b.name == current)
    {
        branch.is_current = true;
    }
}
