//! Command-line interface for op.
//!
//! Parses arguments using clap and provides the [`Cli`] struct containing
//! all user-specified options. With no arguments op asks for everything
//! interactively.

use crate::actions::Action;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for op.
///
/// # Examples
///
/// ```bash
/// # Pick a project, then an action
/// op
///
/// # Open a known project in tmux directly
/// op -a nvim-tmux dotfiles
///
/// # Show what op would offer
/// op --list
/// ```
#[derive(Parser, Debug)]
#[command(name = "op")]
#[command(version)]
#[command(about = "Project picker - open a source directory in a shell, nvim, or tmux")]
#[command(long_about = "op lists the directories under your configured sourceDir,\n\
    lets you fuzzy-pick one with fzf, and then changes into it, opens nvim,\n\
    or sets up a tmux session for it.")]
pub struct Cli {
    /// Project to open, skipping the project picker.
    #[arg(value_name = "PROJECT")]
    pub project: Option<String>,

    /// Action to run, skipping the action picker.
    ///
    /// One of `cd-here`, `nvim-here`, `nvim-tmux`.
    #[arg(short, long, value_name = "ACTION")]
    pub action: Option<Action>,

    /// Config file to read instead of the default search path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// List the projects under sourceDir and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Print the effective configuration and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let cli = Cli::try_parse_from(["op"]).unwrap();
        assert!(cli.project.is_none());
        assert!(cli.action.is_none());
        assert!(!cli.list);
    }

    #[test]
    fn test_project_and_action() {
        let cli = Cli::try_parse_from(["op", "-a", "nvim-tmux", "dotfiles"]).unwrap();
        assert_eq!(cli.project.as_deref(), Some("dotfiles"));
        assert_eq!(cli.action, Some(Action::NvimTmux));
    }

    #[test]
    fn test_rejects_unknown_action() {
        assert!(Cli::try_parse_from(["op", "--action", "emacs-here"]).is_err());
    }

    #[test]
    fn test_config_override() {
        let cli = Cli::try_parse_from(["op", "-c", "/tmp/op.rc", "--print-config"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/op.rc")));
        assert!(cli.print_config);
    }
}
