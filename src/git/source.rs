//! Ref source: the seam between the branch engine and the git executable

use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// `--format` passed to `git for-each-ref`: refname, sha, strict ISO date, subject
pub const FOR_EACH_REF_FORMAT: &str =
    "%(refname)\t%(objectname)\t%(committerdate:iso-strict)\t%(contents:subject)";

/// Which ref namespace a listing covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefNamespace {
    /// Local branches under `refs/heads/`
    Heads,
    /// Remote-tracking branches under `refs/remotes/`
    Remotes,
}

impl RefNamespace {
    /// The ref prefix stripped to form short branch names
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Heads => "refs/heads/",
            Self::Remotes => "refs/remotes/",
        }
    }

    /// Whether refs in this namespace are remote-tracking
    #[must_use]
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::Remotes)
    }
}

/// Read and write access to a repository's branches
///
/// `repo` is the directory to run in; `None` means the process working
/// directory.
pub trait RefSource {
    /// Name of the checked-out branch
    ///
    /// # Errors
    ///
    /// Returns [`Error::DetachedHead`] when HEAD is not a named branch, or
    /// another error if the lookup itself fails
    fn current_branch(&self, repo: Option<&Path>) -> Result<String>;

    /// Raw `for-each-ref` lines for every ref in `namespace`
    ///
    /// # Errors
    ///
    /// Returns an error if the refs cannot be listed
    fn list_refs(&self, repo: Option<&Path>, namespace: RefNamespace) -> Result<String>;

    /// Move the working tree to `name`, creating the branch first if `create` is set
    ///
    /// # Errors
    ///
    /// Returns an error if the switch fails
    fn switch(&self, repo: Option<&Path>, name: &str, create: bool) -> Result<()>;
}

/// [`RefSource`] backed by the `git` executable on `PATH`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GitCli;

impl GitCli {
    /// Create a git-backed ref source
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn run(repo: Option<&Path>, args: &[&str]) -> Result<String> {
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = repo.filter(|dir| !dir.as_os_str().is_empty()) {
            command.current_dir(dir);
        }

        debug!(?args, "Running git");
        let output = command.output()?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            warn!(?args, status = %output.status, "git command failed");
            return Err(Error::Git {
                args: args.join(" "),
                status: output.status.to_string(),
                output: combined.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl RefSource for GitCli {
    fn current_branch(&self, repo: Option<&Path>) -> Result<String> {
        let name = Self::run(repo, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        let name = name.trim();
        if name == "HEAD" {
            return Err(Error::DetachedHead);
        }
        Ok(name.to_string())
    }

    fn list_refs(&self, repo: Option<&Path>, namespace: RefNamespace) -> Result<String> {
        let format = format!("--format={FOR_EACH_REF_FORMAT}");
        Self::run(repo, &["for-each-ref", &format, namespace.prefix()])
    }

    fn switch(&self, repo: Option<&Path>, name: &str, create: bool) -> Result<()> {
        let mut args = vec!["switch"];
        if create {
            args.push("-c");
        }
        args.push(name);
        Self::run(repo, &args).map(|_| ())
    }
}
