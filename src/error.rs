//! Error taxonomy for the branch engine

use thiserror::Error;

/// Errors produced by the ref source, query engine and switch executor
#[derive(Debug, Error)]
pub enum Error {
    /// A scope value outside `local`, `remote` and `all`
    #[error("invalid scope '{0}'; use local|remote|all")]
    InvalidScope(String),

    /// An empty or whitespace-only branch name was given to a switch
    #[error("branch name required")]
    EmptyBranchName,

    /// HEAD points at a commit rather than a named branch
    #[error("HEAD is not a branch (detached HEAD state)")]
    DetachedHead,

    /// git ran but exited unsuccessfully
    #[error("git {args} failed: {status}: {output}")]
    Git {
        /// Arguments passed to git, space separated
        args: String,
        /// Exit status as reported by the OS
        status: String,
        /// Combined stdout and stderr of the failed command
        output: String,
    },

    /// git could not be started at all
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// A numeric selection that is not a positive integer
    #[error("invalid selection")]
    InvalidSelection,

    /// A numeric selection past the end of the filtered list
    #[error("selection {requested} out of range (1-{total})")]
    OutOfRange {
        /// The 1-based position the user asked for
        requested: usize,
        /// Number of branches matching the active filter
        total: usize,
    },
}

impl Error {
    /// Whether this error is the detached-HEAD case of a current-branch lookup
    #[must_use]
    pub const fn is_detached_head(&self) -> bool {
        matches!(self, Self::DetachedHead)
    }
}

/// Result alias for branch engine operations
pub type Result<T> = std::result::Result<T, Error>;
