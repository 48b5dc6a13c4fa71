//! In-memory ref source for unit tests

use std::path::Path;

use parking_lot::Mutex;

use super::{RefNamespace, RefSource};
use crate::error::{Error, Result};

/// A scripted [`RefSource`] that records switch requests
#[derive(Debug, Default)]
pub struct FakeSource {
    heads: String,
    remotes: String,
    current: Option<String>,
    list_error: Option<String>,
    switch_error: Option<String>,
    switches: Mutex<Vec<(String, bool)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a local branch with the given committer date (any string)
    pub fn local(mut self, name: &str, date: &str) -> Self {
        self.heads.push_str(&line("refs/heads/", name, date));
        self
    }

    /// Add a remote-tracking branch; `name` includes the remote, e.g. `origin/main`
    pub fn remote(mut self, name: &str, date: &str) -> Self {
        self.remotes.push_str(&line("refs/remotes/", name, date));
        self
    }

    /// Check out `name`; without this HEAD is detached
    pub fn on_branch(mut self, name: &str) -> Self {
        self.current = Some(name.to_string());
        self
    }

    pub fn failing_list(mut self, output: &str) -> Self {
        self.list_error = Some(output.to_string());
        self
    }

    pub fn failing_switch(mut self, output: &str) -> Self {
        self.switch_error = Some(output.to_string());
        self
    }

    pub fn switch_calls(&self) -> Vec<(String, bool)> {
        self.switches.lock().clone()
    }
}

fn line(prefix: &str, name: &str, date: &str) -> String {
    format!("{prefix}{name}\t0123456789abcdef0123456789abcdef01234567\t{date}\tcommit on {name}\n")
}

fn git_error(args: &str, output: &str) -> Error {
    Error::Git {
        args: args.to_string(),
        status: "exit status: 128".to_string(),
        output: output.to_string(),
    }
}

impl RefSource for FakeSource {
    fn current_branch(&self, _repo: Option<&Path>) -> Result<String> {
        self.current.clone().ok_or(Error::DetachedHead)
    }

    fn list_refs(&self, _repo: Option<&Path>, namespace: RefNamespace) -> Result<String> {
        if let Some(output) = &self.list_error {
            return Err(git_error("for-each-ref", output));
        }
        Ok(match namespace {
            RefNamespace::Heads => self.heads.clone(),
            RefNamespace::Remotes => self.remotes.clone(),
        })
    }

    fn switch(&self, _repo: Option<&Path>, name: &str, create: bool) -> Result<()> {
        self.switches.lock().push((name.to_string(), create));
        match &self.switch_error {
            Some(output) => Err(git_error(&format!("switch {name}"), output)),
            None => Ok(()),
        }
    }
}
