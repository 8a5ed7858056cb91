//! Configuration types for op.
//!
//! The config file is a plain list of directives, one per line:
//!
//! ```text
//! # comment
//! set sourceDir ~/source/repos
//! set isServer true
//! set shellPrefix nix develop -c
//! ```
//!
//! Lines are trimmed before they are classified, so blank and
//! whitespace-only lines are skipped, and so are comments, including
//! indented ones (`   # note`). Any command other than `set`, or any key
//! other than the ones below, is an error.

use crate::error::{OpError, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// User preferences read from the config file.
///
/// Built once at startup with [`Configuration::default`], updated by each
/// `set` directive, then passed by reference to everything that needs it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Root directory under which projects live. `None` until set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
    /// Whether this machine is a server (tmux first in the action menu).
    pub is_server: bool,
    /// Command prepended when launching an interactive shell.
    pub shell_prefix: String,
}

impl Configuration {
    /// Parse directives from a string, starting from the defaults.
    ///
    /// # Errors
    ///
    /// Returns the first [`OpError::UnknownCommand`], [`OpError::UnknownKey`]
    /// or [`OpError::MalformedDirective`] encountered. Parsing stops there.
    ///
    /// # Examples
    ///
    /// ```
    /// use op::config::Configuration;
    ///
    /// let config = Configuration::parse("# comment\n\nset sourceDir /tmp/x\nset isServer true\n").unwrap();
    /// assert_eq!(config.source_dir.as_deref(), Some("/tmp/x"));
    /// assert!(config.is_server);
    /// ```
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config = Configuration::default();
        config.apply(contents)?;
        Ok(config)
    }

    /// Apply every directive in `contents` on top of the current values.
    pub fn apply(&mut self, contents: &str) -> Result<()> {
        for (i, line) in contents.lines().enumerate() {
            self.apply_line(i + 1, line)?;
        }
        Ok(())
    }

    /// Apply a single line. `line_no` is 1-based and only used in errors.
    pub fn apply_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (command, args) = split_token(line);
        match command {
            "set" => self.set(line_no, line, args),
            _ => Err(OpError::UnknownCommand {
                line: line_no,
                command: command.to_string(),
            }),
        }
    }

    fn set(&mut self, line_no: usize, line: &str, args: &str) -> Result<()> {
        let (key, value) = split_token(args);
        if key.is_empty() || value.is_empty() {
            return Err(OpError::MalformedDirective {
                line: line_no,
                text: line.to_string(),
            });
        }

        debug!(key, value, "config set");

        match key {
            "sourceDir" => self.source_dir = Some(value.to_string()),
            "isServer" => self.is_server = value == "true",
            "shellPrefix" => self.shell_prefix = value.to_string(),
            _ => {
                return Err(OpError::UnknownKey {
                    line: line_no,
                    key: key.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(
            f,
            "  sourceDir: {}",
            self.source_dir.as_deref().unwrap_or("UNSET")
        )?;
        writeln!(f, "  isServer: {}", self.is_server)?;
        write!(f, "  shellPrefix: {}", self.shell_prefix)
    }
}

/// Split off the first whitespace-delimited token.
///
/// Returns `(token, rest)` with both sides trimmed; `rest` keeps its
/// internal whitespace.
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (s, ""),
    }
}
