//! Tmux session and window management.
//!
//! Every operation is a single `tmux` invocation. Builders return a
//! [`TmuxCommand`] so a whole session layout can be assembled, inspected,
//! and then run in order with [`run_all`].
//!
//! # Targets
//!
//! Windows are addressed as `session:window` by name, so the layout does
//! not depend on `base-index` or `pane-base-index`.

use crate::error::{OpError, Result};
use std::process::Command;
use tracing::debug;

/// One `tmux` invocation, stored as its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxCommand {
    args: Vec<String>,
}

impl TmuxCommand {
    /// Build a command from tmux arguments (without the `tmux` itself).
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The arguments passed to `tmux`.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The tmux subcommand, e.g. `new-session`.
    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    /// Run the command, inheriting stdio, and wait for it.
    ///
    /// # Errors
    ///
    /// [`OpError::TmuxError`] if tmux cannot be started or exits non-zero.
    pub fn run(&self) -> Result<()> {
        debug!(args = ?self.args, "tmux");
        let status = Command::new("tmux")
            .args(&self.args)
            .status()
            .map_err(|e| OpError::TmuxError(e.to_string()))?;

        if !status.success() {
            return Err(OpError::TmuxError(format!("{} failed", self.subcommand())));
        }

        Ok(())
    }
}

/// Run commands in order, stopping at the first failure.
pub fn run_all(commands: &[TmuxCommand]) -> Result<()> {
    for command in commands {
        command.run()?;
    }
    Ok(())
}

/// Check if we're running inside a tmux session.
///
/// Checks for the `TMUX` environment variable, which tmux sets when active.
pub fn in_tmux() -> bool {
    std::env::var("TMUX").is_ok()
}

/// Check whether a session with exactly this name exists.
pub fn has_session(name: &str) -> Result<bool> {
    let target = format!("={}", name);
    let output = Command::new("tmux")
        .args(["has-session", "-t", &target])
        .output()
        .map_err(|e| OpError::TmuxError(e.to_string()))?;

    Ok(output.status.success())
}

/// Make a tmux-safe session name from a directory path.
///
/// Uses the last path component; `.` and `:` are not allowed in session
/// names and become `_`.
///
/// # Examples
///
/// ```
/// use op::tmux::session_name;
///
/// assert_eq!(session_name("/home/me/src/site.io"), "site_io");
/// ```
pub fn session_name(path: &str) -> String {
    let base = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("");
    if base.is_empty() {
        return "op".to_string();
    }
    base.replace(['.', ':'], "_")
}

/// `session:window` target string.
pub fn window_target(session: &str, window: &str) -> String {
    format!("{}:{}", session, window)
}

/// Create a detached session whose first window is named `window`.
pub fn new_session(name: &str, dir: &str, window: &str) -> TmuxCommand {
    TmuxCommand::new(["new-session", "-d", "-s", name, "-c", dir, "-n", window])
}

/// Add a named window to a session.
pub fn new_window(session: &str, window: &str, dir: &str) -> TmuxCommand {
    let target = format!("{}:", session);
    TmuxCommand::new(["new-window", "-t", &target, "-n", window, "-c", dir])
}

/// Split the target window side by side; the new pane becomes active.
pub fn split_window(target: &str, dir: &str) -> TmuxCommand {
    TmuxCommand::new(["split-window", "-h", "-t", target, "-c", dir])
}

/// Type `keys` into the target's active pane and press Enter.
pub fn send_keys(target: &str, keys: &str) -> TmuxCommand {
    TmuxCommand::new(["send-keys", "-t", target, keys, "Enter"])
}

/// Focus a window.
pub fn select_window(target: &str) -> TmuxCommand {
    TmuxCommand::new(["select-window", "-t", target])
}

/// Bring a session to the foreground.
///
/// Inside tmux the current client is switched; outside, the terminal attaches.
pub fn attach(name: &str, inside_tmux: bool) -> TmuxCommand {
    let target = format!("={}", name);
    if inside_tmux {
        TmuxCommand::new(["switch-client", "-t", &target])
    } else {
        TmuxCommand::new(["attach-session", "-t", &target])
    }
}
