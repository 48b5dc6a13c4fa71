//! gotobranch - browse, filter and switch git branches from the terminal

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use gotobranch::git::{self, GitCli};
use gotobranch::query::Scope;
use gotobranch::{Config, Exit, Session, SessionOptions, tui};
use std::path::PathBuf;
use tracing::info;

const LOG_FILE: &str = "gotobranch.log";

/// Browse, filter and switch git branches
#[derive(Debug, Parser)]
#[command(name = "gotobranch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository to operate on (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    repo: Option<PathBuf>,

    /// Which branches to list: local, remote or all
    #[arg(long)]
    scope: Option<Scope>,

    /// Branches per page
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Initial filter pattern
    pattern: Option<String>,
}

fn main() -> Result<()> {
    let log_dir = std::env::temp_dir();

    // Clear the log file on startup
    if let Err(e) = std::fs::write(log_dir.join(LOG_FILE), "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    // Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level > 0 {
        let level = match debug_level {
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        };

        let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("{e}");
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let config = Config::load(cli.config.as_deref())?;
    let options = session_options(cli, &config)?;
    info!(
        repo = ?options.repo_path,
        scope = %options.scope,
        page_size = options.page_size,
        "Starting selection"
    );

    match tui::run(Session::new(options), GitCli::new(), config.poll_interval_ms)? {
        Exit::Quit => {}
        Exit::Switched { branch, previous } => {
            println!("{}", switched_message(&branch, previous.as_deref()));
        }
    }
    Ok(())
}

/// Merge flags over config and resolve the repository root
fn session_options(cli: Cli, config: &Config) -> Result<SessionOptions> {
    let start = match cli.repo {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let root = git::repository_root(&start)?;

    Ok(SessionOptions {
        repo_path: Some(root),
        scope: cli.scope.unwrap_or(config.scope),
        page_size: cli.page_size.unwrap_or(config.page_size),
        pattern: cli.pattern.unwrap_or_default(),
    })
}

fn switched_message(branch: &str, previous: Option<&str>) -> String {
    previous.map_or_else(
        || format!("Switched to branch '{branch}'"),
        |previous| format!("Switched to branch '{branch}' (was '{previous}')"),
    )
}
