//! Terminal user interface for gotobranch

mod render;

pub use render::render;

use anyhow::{Context, Result};
use ratatui::crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::debug;

use crate::app::{Event, Exit, Handler, Message, Session, Worker};
use crate::config::input_from_key;
use crate::git::RefSource;

/// Run an interactive selection until the user quits or a switch succeeds
///
/// The terminal is restored before returning, whatever the outcome.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to or polled
pub fn run<S>(session: Session, source: S, poll_interval_ms: u64) -> Result<Exit>
where
    S: RefSource + Send + Sync + 'static,
{
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(e).context("Failed to create terminal");
        }
    };

    let result = run_loop(
        &mut terminal,
        session,
        &Worker::new(source),
        &Handler::new(poll_interval_ms),
    );

    let restored = restore_terminal(&mut terminal);
    let exit = result?;
    restored?;
    Ok(exit)
}

/// Undo the terminal setup; every step runs even when an earlier one fails
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let steps = [
        ("Failed to disable raw mode", disable_raw_mode()),
        (
            "Failed to leave alternate screen",
            execute!(terminal.backend_mut(), LeaveAlternateScreen),
        ),
        ("Failed to show cursor", terminal.show_cursor()),
    ];
    first_failure(steps)
}

/// The first failed step, with its description as context
fn first_failure<I>(steps: I) -> Result<()>
where
    I: IntoIterator<Item = (&'static str, io::Result<()>)>,
{
    for (description, step) in steps {
        step.context(description)?;
    }
    Ok(())
}

fn run_loop<S>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut session: Session,
    worker: &Worker<S>,
    events: &Handler,
) -> Result<Exit>
where
    S: RefSource + Send + Sync + 'static,
{
    worker.spawn_all(session.init());

    loop {
        terminal.draw(|frame| render(frame, &session.view()))?;

        while let Some(message) = worker.try_recv() {
            worker.spawn_all(session.update(message));
        }

        if let Some(exit) = session.exit.take() {
            debug!(?exit, "Leaving event loop");
            return Ok(exit);
        }

        match events.next()? {
            Event::Key(key) => {
                if let Some(input) = input_from_key(key.code, key.modifiers) {
                    worker.spawn_all(session.update(Message::Input(input)));
                }
            }
            Event::Resize(_, _) | Event::Tick => {}
        }
    }
}
