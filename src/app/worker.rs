//! Background execution of session tasks

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, warn};

use super::message::{Message, Task};
use crate::error::Error;
use crate::git::{RefSource, switch_branch};
use crate::query::{list_branches, locate};

/// Run a task to completion on the calling thread
///
/// A jump resolves its position first; when that fails the switch is never
/// attempted and the resolution error is reported as a failed switch.
#[must_use]
pub fn execute<S: RefSource + ?Sized>(source: &S, task: Task) -> Message {
    match task {
        Task::Refresh { id, query } => Message::QueryFinished {
            id,
            result: list_branches(source, &query),
        },
        Task::Switch { repo_path, name } => Message::SwitchFinished {
            result: switch_branch(source, repo_path.as_deref(), &name, false),
        },
        Task::Jump { position, query } => {
            let result = locate(source, &query, position).and_then(|branch| {
                debug!(position, branch = %branch.name, "Resolved numeric selection");
                switch_branch(source, query.repo(), &branch.name, false)
            });
            Message::SwitchFinished { result }
        }
    }
}

/// The message a task reports when it could not be started
fn failed(task: &Task, error: std::io::Error) -> Message {
    match task {
        Task::Refresh { id, .. } => Message::QueryFinished {
            id: *id,
            result: Err(Error::Spawn(error)),
        },
        Task::Switch { .. } | Task::Jump { .. } => Message::SwitchFinished {
            result: Err(Error::Spawn(error)),
        },
    }
}

/// Runs each task on its own thread and collects the resulting messages
///
/// Threads are never joined; a task still running when the session ends is
/// abandoned with the process.
#[derive(Debug)]
pub struct Worker<S> {
    source: Arc<S>,
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl<S: RefSource + Send + Sync + 'static> Worker<S> {
    /// Create a worker that runs tasks against `source`
    #[must_use]
    pub fn new(source: S) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source: Arc::new(source),
            tx,
            rx,
        }
    }

    /// Start `task` in the background
    pub fn spawn(&self, task: Task) {
        debug!(?task, "Spawning task");
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let fallback = task.clone();

        let spawned = thread::Builder::new()
            .name("gotobranch-task".to_string())
            .spawn(move || {
                let message = execute(source.as_ref(), task);
                // The receiver is gone once the session has ended
                let _ = tx.send(message);
            });

        if let Err(e) = spawned {
            warn!(error = %e, "Failed to start background task");
            let _ = self.tx.send(failed(&fallback, e));
        }
    }

    /// Start every task in `tasks`
    pub fn spawn_all(&self, tasks: Vec<Task>) {
        for task in tasks {
            self.spawn(task);
        }
    }

    /// Take one finished message without blocking
    #[must_use]
    pub fn try_recv(&self) -> Option<Message> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished message
    #[must_use]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Message> {
        self.rx.recv_timeout(timeout).ok()
    }
}
