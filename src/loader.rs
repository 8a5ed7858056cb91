//! Config file discovery and loading.
//!
//! The search order is:
//!
//! 1. `./op.rc` in the current directory
//! 2. `$XDG_CONFIG_HOME/op/op.rc`
//! 3. `~/.config/op/op.rc`
//!
//! A missing config file is not an error: op runs with the defaults.

use crate::config::Configuration;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name op looks for.
pub const CONFIG_FILE_NAME: &str = "op.rc";

/// Determine the config file path.
///
/// Returns the first candidate that exists. If none does, returns
/// `./op.rc`, which [`load_config`] then treats as "use defaults".
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("op").join(CONFIG_FILE_NAME);
        if path.exists() {
            return path;
        }
    }

    if let Some(home) = dirs::home_dir() {
        let path = home.join(".config").join("op").join(CONFIG_FILE_NAME);
        if path.exists() {
            return path;
        }
    }

    local
}

/// Load and parse a config file from the given path.
///
/// # Errors
///
/// - [`crate::OpError::IoError`] if the file exists but cannot be read
/// - any parse error from [`Configuration::parse`]
pub fn load_config(path: &Path) -> Result<Configuration> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Configuration::default());
    }

    info!(path = %path.display(), "loading config");
    let contents = std::fs::read_to_string(path)?;
    Configuration::parse(&contents)
}

/// Load config from `path` if given, otherwise from the default location.
pub fn load(path: Option<&Path>) -> Result<Configuration> {
    match path {
        Some(p) => load_config(p),
        None => load_config(&default_config_path()),
    }
}
