//! # op
//!
//! A project picker: list the directories under a source root, fuzzy-pick
//! one with fzf, then open it in a shell, in nvim, or in a tmux session.
//!
//! ## Config
//!
//! ```text
//! # ./op.rc or ~/.config/op/op.rc
//! set sourceDir ~/source/repos
//! set isServer false
//! set shellPrefix nix develop -c
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into these modules:
//!
//! - [`config`]: the `set key value` directive parser and [`Configuration`]
//! - [`loader`]: config file discovery and loading
//! - [`paths`]: tilde expansion and absolute-path normalization
//! - [`listing`]: source directory listing
//! - [`picker`]: fzf-backed selection
//! - [`actions`]: selection resolution and the `cd-here` / `nvim-here` / `nvim-tmux` actions
//! - [`tmux`]: tmux session and window commands
//! - [`cli`]: Command-line argument parsing with clap
//! - [`error`]: Error types

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod loader;
pub mod paths;
pub mod picker;
pub mod tmux;

pub use actions::Action;
pub use config::Configuration;
pub use error::{OpError, Result};
