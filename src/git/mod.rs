//! Git operations module

mod branch;
#[cfg(test)]
pub(crate) mod fake;
mod source;
mod switch;

pub use branch::{Branch, mark_current, parse_for_each_ref};
pub use source::{FOR_EACH_REF_FORMAT, GitCli, RefNamespace, RefSource};
pub use switch::{Switched, switch_branch};

use anyhow::{Context, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Open a git repository at the given path
///
/// # Errors
///
/// Returns an error if the path is not a git repository
pub fn open_repository(path: &Path) -> Result<Repository> {
    Repository::discover(path)
        .with_context(|| format!("Failed to open git repository at {}", path.display()))
}

/// Get the root of the working tree containing the given path
///
/// # Errors
///
/// Returns an error if the path is not inside a git repository or the
/// repository is bare
pub fn repository_root(path: &Path) -> Result<PathBuf> {
    let repo = open_repository(path)?;
    repo.workdir()
        .map(Path::to_path_buf)
        .context("Repository has no working directory")
}
