//! Configuration management for gotobranch

pub mod keys;

pub use keys::{KeyHint, input_from_key};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::query::Scope;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "GOTOBRANCH_CONFIG";

/// Application configuration
///
/// Read from JSON; every field is optional. Command-line flags take
/// precedence over values loaded here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Default branch scope
    #[serde(default)]
    pub scope: Scope,

    /// Branches shown per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Event loop tick in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

const fn default_page_size() -> usize {
    25
}

const fn default_poll_interval() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scope: Scope::default(),
            page_size: default_page_size(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path wins, then `$GOTOBRANCH_CONFIG`, then the per-user
    /// default location. Only the default location may be absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Self::load_from(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        default_path_from(
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("HOME"),
        )
    }
}

fn default_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|dir| !dir.is_empty())
                .map(|dir| PathBuf::from(dir).join(".config"))
        })?;
    Some(base.join("gotobranch").join("config.json"))
}
