//! gotobranch - browse, filter and switch git branches from the terminal
//!
//! The branch engine lists refs through a [`git::RefSource`], filters, sorts
//! and paginates them with [`query`], and switches the working tree with
//! [`git::switch_branch`]. The interactive selection is a pure state machine
//! in [`app`] driven by the event loop in [`tui`].

pub mod app;
pub mod config;
pub mod error;
pub mod git;
pub mod query;
pub mod tui;

pub use app::{Exit, Session, SessionOptions};
pub use config::Config;
pub use error::{Error, Result};
