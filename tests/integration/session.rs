//! End-to-end selection sessions driven through the background worker

use std::time::Duration;

use crate::common::TestFixture;
use gotobranch::app::{Input, Message, Worker};
use gotobranch::git::GitCli;
use gotobranch::query::Scope;
use gotobranch::{Exit, Session, SessionOptions};
use pretty_assertions::assert_eq;

const WAIT: Duration = Duration::from_secs(10);

fn start(fixture: &TestFixture, page_size: usize) -> Session {
    Session::new(SessionOptions {
        repo_path: Some(fixture.repo_path.clone()),
        scope: Scope::Local,
        page_size,
        pattern: String::new(),
    })
}

/// Feed messages back until no task is outstanding
fn settle(
    session: &mut Session,
    worker: &Worker<GitCli>,
    mut outstanding: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    while outstanding > 0 {
        let message = worker
            .recv_timeout(WAIT)
            .ok_or("timed out waiting for a background task")?;
        outstanding -= 1;
        let tasks = session.update(message);
        outstanding += tasks.len();
        worker.spawn_all(tasks);
    }
    Ok(())
}

fn press(
    session: &mut Session,
    worker: &Worker<GitCli>,
    input: Input,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = session.update(Message::Input(input));
    let outstanding = tasks.len();
    worker.spawn_all(tasks);
    settle(session, worker, outstanding)
}

#[test]
fn test_select_with_cursor_and_switch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture.branch("dev", 20)?.branch("fix", 10)?;
    let worker = Worker::new(GitCli::new());
    let mut session = start(&fixture, 10);

    let tasks = session.init();
    let outstanding = tasks.len();
    worker.spawn_all(tasks);
    settle(&mut session, &worker, outstanding)?;

    let listed: Vec<&str> = session.items.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(listed, vec!["dev", "fix", "master"]);
    assert!(session.items[2].is_current);

    press(&mut session, &worker, Input::Down)?;
    press(&mut session, &worker, Input::Enter)?;

    assert_eq!(
        session.exit,
        Some(Exit::Switched {
            branch: "fix".to_string(),
            previous: Some("master".to_string()),
        })
    );
    assert_eq!(fixture.head_branch()?.as_deref(), Some("fix"));
    Ok(())
}

#[test]
fn test_numeric_jump_beyond_first_page() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture
        .branch("a", 40)?
        .branch("b", 30)?
        .branch("c", 20)?;
    let worker = Worker::new(GitCli::new());
    let mut session = start(&fixture, 2);

    let tasks = session.init();
    let outstanding = tasks.len();
    worker.spawn_all(tasks);
    settle(&mut session, &worker, outstanding)?;
    assert_eq!(session.total_pages, 2);

    press(&mut session, &worker, Input::Char('3'))?;
    press(&mut session, &worker, Input::Enter)?;

    assert!(session.is_finished());
    assert_eq!(fixture.head_branch()?.as_deref(), Some("c"));
    Ok(())
}

#[test]
fn test_numeric_jump_out_of_range() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture.branch("dev", 10)?;
    let worker = Worker::new(GitCli::new());
    let mut session = start(&fixture, 10);

    let tasks = session.init();
    let outstanding = tasks.len();
    worker.spawn_all(tasks);
    settle(&mut session, &worker, outstanding)?;
    assert_eq!(session.total, 2);

    press(&mut session, &worker, Input::Char('3'))?;
    press(&mut session, &worker, Input::Enter)?;

    assert!(!session.is_finished());
    assert!(
        session
            .last_error
            .as_deref()
            .is_some_and(|e| e.contains("out of range")),
        "unexpected error: {:?}",
        session.last_error
    );
    assert_eq!(fixture.head_branch()?.as_deref(), Some("master"));
    Ok(())
}

#[test]
fn test_filter_then_switch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture
        .branch("feature/login", 30)?
        .branch("bugfix/crash", 20)?
        .branch("feature/logout", 10)?;
    let worker = Worker::new(GitCli::new());
    let mut session = start(&fixture, 10);

    let tasks = session.init();
    let outstanding = tasks.len();
    worker.spawn_all(tasks);
    settle(&mut session, &worker, outstanding)?;

    press(&mut session, &worker, Input::Char('f'))?;
    for c in "LOGOUT".chars() {
        press(&mut session, &worker, Input::Char(c))?;
    }
    assert_eq!(session.total, 1);
    assert_eq!(session.items[0].name, "feature/logout");

    press(&mut session, &worker, Input::Enter)?;
    assert_eq!(fixture.head_branch()?.as_deref(), Some("feature/logout"));
    Ok(())
}

#[test]
fn test_failed_switch_keeps_session() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture.branch("dev", 10)?;
    let worker = Worker::new(GitCli::new());
    let mut session = start(&fixture, 10);

    let tasks = session.init();
    let outstanding = tasks.len();
    worker.spawn_all(tasks);
    settle(&mut session, &worker, outstanding)?;

    // Delete the listed branch behind the session's back
    let repo = git2::Repository::open(&fixture.repo_path)?;
    repo.find_branch("dev", git2::BranchType::Local)?.delete()?;
    assert_eq!(session.items[0].name, "dev");

    press(&mut session, &worker, Input::Enter)?;

    assert!(!session.is_finished());
    assert!(session.last_error.is_some());
    assert_eq!(fixture.head_branch()?.as_deref(), Some("master"));
    Ok(())
}
