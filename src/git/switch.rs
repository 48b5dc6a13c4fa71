//! Switch executor: moves the working tree to a chosen branch

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::RefSource;
use crate::error::{Error, Result};

/// Outcome of a successful branch switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switched {
    /// The branch now checked out
    pub branch: String,
    /// The branch checked out before the switch, when it could be determined
    pub previous: Option<String>,
}

/// Switch the working tree at `repo` to `target`
///
/// The previously checked-out branch is looked up first on a best-effort
/// basis: a detached HEAD or failed lookup leaves `previous` empty and does not
/// block the switch. With `create` set the branch is created from HEAD.
///
/// # Errors
///
/// Returns [`Error::EmptyBranchName`] for a blank target without invoking git,
/// or the ref source's error verbatim if the switch fails. Nothing is rolled
/// back on failure.
pub fn switch_branch<S: RefSource + ?Sized>(
    source: &S,
    repo: Option<&Path>,
    target: &str,
    create: bool,
) -> Result<Switched> {
    if target.trim().is_empty() {
        return Err(Error::EmptyBranchName);
    }

    let previous = match source.current_branch(repo) {
        Ok(name) => Some(name),
        Err(e) => {
            debug!(error = %e, "No previous branch before switch");
            None
        }
    };

    source.switch(repo, target, create)?;

    info!(branch = %target, previous = ?previous, create, "Switched branch");
    Ok(Switched {
        branch: target.to_string(),
        previous,
    })
}
