//! Selection resolution and the post-selection actions.
//!
//! After the user picks a project, one of a fixed set of actions runs on
//! its resolved path:
//!
//! - `cd-here`: replace op with an interactive shell in the directory
//! - `nvim-here`: open nvim on the directory and wait for it
//! - `nvim-tmux`: open (or reuse) a tmux session for the directory
//!
//! # Tmux Layout
//!
//! A new session gets two windows: `editor` running `nvim .`, and `shell`
//! split side by side. The right-hand shell pane shows `git status` when
//! the directory is a git checkout.

use crate::config::Configuration;
use crate::error::{OpError, Result};
use crate::paths::{self, HomeDirs, SystemHomeDirs};
use crate::picker::Picker;
use crate::tmux::{self, TmuxCommand};
use std::fmt;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;
use tracing::info;

/// Shell launched when `$SHELL` is unset.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Editor used by `nvim-here` and `nvim-tmux`.
pub const EDITOR: &str = "nvim";

const EDITOR_WINDOW: &str = "editor";
const SHELL_WINDOW: &str = "shell";

/// What to do with the selected directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Change into the directory and start a shell.
    CdHere,
    /// Open nvim in the directory.
    NvimHere,
    /// Open a tmux session for the directory.
    NvimTmux,
}

impl Action {
    /// Every action, in default menu order.
    pub const ALL: [Action; 3] = [Action::NvimHere, Action::CdHere, Action::NvimTmux];

    /// The name shown in the picker and accepted by `--action`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CdHere => "cd-here",
            Action::NvimHere => "nvim-here",
            Action::NvimTmux => "nvim-tmux",
        }
    }

    /// Actions in menu order for this machine.
    ///
    /// On servers `nvim-tmux` comes first so it is fzf's default.
    pub fn available(config: &Configuration) -> Vec<Action> {
        if config.is_server {
            vec![Action::NvimTmux, Action::NvimHere, Action::CdHere]
        } else {
            Action::ALL.to_vec()
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = OpError;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s.trim())
            .ok_or_else(|| OpError::UnknownAction(s.to_string()))
    }
}

/// Absolute path of the configured source directory.
///
/// # Errors
///
/// [`OpError::SourceDirUnset`] if no `set sourceDir` directive was read,
/// plus any resolution error from [`paths::make_absolute`].
pub fn source_root(config: &Configuration) -> Result<String> {
    let source_dir = config.source_dir.as_deref().ok_or(OpError::SourceDirUnset)?;
    paths::make_absolute(source_dir)
}

/// Turn a picked entry name into the project's absolute path.
pub fn resolve_selection(config: &Configuration, name: &str) -> Result<String> {
    resolve_selection_with(config, name, &SystemHomeDirs)
}

/// [`resolve_selection`] with an explicit home directory source.
pub fn resolve_selection_with(
    config: &Configuration,
    name: &str,
    homes: &impl HomeDirs,
) -> Result<String> {
    let source_dir = config.source_dir.as_deref().ok_or(OpError::SourceDirUnset)?;
    let joined = format!("{}/{}", source_dir.trim_end_matches('/'), name);
    paths::make_absolute_with(&joined, homes)
}

/// Ask the user for a project among `entries`.
pub fn select_project(picker: &impl Picker, entries: &[String]) -> Result<String> {
    picker
        .pick("project", entries)?
        .ok_or(OpError::NoSelection("project"))
}

/// Ask the user for an action.
pub fn select_action(picker: &impl Picker, config: &Configuration) -> Result<Action> {
    let names: Vec<String> = Action::available(config)
        .iter()
        .map(|a| a.to_string())
        .collect();
    picker
        .pick("action", &names)?
        .ok_or(OpError::NoSelection("action"))?
        .parse()
}

/// Run an action on a resolved project path.
pub fn run(action: Action, path: &str, config: &Configuration) -> Result<()> {
    info!(action = %action, path, "running action");
    match action {
        Action::CdHere => cd_here(path, config),
        Action::NvimHere => nvim_here(path),
        Action::NvimTmux => nvim_tmux(path, config),
    }
}

/// The user's interactive shell.
pub fn shell_program() -> String {
    std::env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string())
}

/// Command line that starts the interactive shell, with the prefix applied.
pub fn shell_command(config: &Configuration, shell: &str) -> String {
    if config.shell_prefix.is_empty() {
        shell.to_string()
    } else {
        format!("{} {}", config.shell_prefix, shell)
    }
}

fn cd_here(path: &str, config: &Configuration) -> Result<()> {
    std::env::set_current_dir(path).map_err(|e| OpError::ProcessFailed {
        program: "cd".into(),
        reason: format!("{}: {}", path, e),
    })?;

    let shell = shell_program();
    let mut command = if config.shell_prefix.is_empty() {
        Command::new(&shell)
    } else {
        let mut c = Command::new("/bin/sh");
        c.args(["-c", &shell_command(config, &shell)]);
        c
    };

    exec_shell(&mut command, &shell)
}

#[cfg(unix)]
fn exec_shell(command: &mut Command, shell: &str) -> Result<()> {
    use std::os::unix::process::CommandExt;

    // exec only returns on failure
    let err = command.exec();
    Err(OpError::ProcessFailed {
        program: shell.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(not(unix))]
fn exec_shell(command: &mut Command, shell: &str) -> Result<()> {
    wait_for(command, shell)
}

fn nvim_here(path: &str) -> Result<()> {
    let mut command = Command::new(EDITOR);
    command.arg(path).current_dir(path);
    wait_for(&mut command, EDITOR)
}

fn wait_for(command: &mut Command, program: &str) -> Result<()> {
    let status = command.status().map_err(|e| OpError::ProcessFailed {
        program: program.to_string(),
        reason: e.to_string(),
    })?;

    if !status.success() {
        return Err(OpError::ProcessFailed {
            program: program.to_string(),
            reason: format!("exited with {}", status),
        });
    }

    Ok(())
}

fn nvim_tmux(path: &str, config: &Configuration) -> Result<()> {
    let name = tmux::session_name(path);

    if tmux::has_session(&name)? {
        info!(session = %name, "reusing tmux session");
    } else {
        let is_repo = Path::new(path).join(".git").exists();
        let shell = shell_command(config, &shell_program());
        tmux::run_all(&session_plan(&name, path, &shell, config, is_repo))?;
    }

    tmux::attach(&name, tmux::in_tmux()).run()
}

/// Commands that build a fresh project session, in order.
///
/// `shell` is only typed into the shell panes when a shell prefix is
/// configured; otherwise tmux's default shell is already running there.
pub fn session_plan(
    name: &str,
    path: &str,
    shell: &str,
    config: &Configuration,
    is_repo: bool,
) -> Vec<TmuxCommand> {
    let editor = tmux::window_target(name, EDITOR_WINDOW);
    let shell_window = tmux::window_target(name, SHELL_WINDOW);
    let editor_keys = format!("{} .", EDITOR);

    let mut plan = vec![
        tmux::new_session(name, path, EDITOR_WINDOW),
        tmux::send_keys(&editor, &editor_keys),
        tmux::new_window(name, SHELL_WINDOW, path),
    ];

    let prefixed = !config.shell_prefix.is_empty();
    if prefixed {
        plan.push(tmux::send_keys(&shell_window, shell));
    }

    plan.push(tmux::split_window(&shell_window, path));
    if prefixed {
        plan.push(tmux::send_keys(&shell_window, shell));
    }
    if is_repo {
        plan.push(tmux::send_keys(&shell_window, "git status"));
    }

    plan.push(tmux::select_window(&editor));
    plan
}
