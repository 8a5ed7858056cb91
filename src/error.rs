//! Error types for op.
//!
//! All errors in op are represented by [`OpError`], which covers config
//! directives, path resolution, and failures of the external tools op drives
//! (fzf, tmux, nvim, the shell).

use thiserror::Error;

/// All possible errors that can occur in op.
#[derive(Error, Debug)]
pub enum OpError {
    /// Failed to read a file or directory from disk.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A config line used a command other than `set`.
    #[error("Unknown config command on line {line}: {command}")]
    UnknownCommand { line: usize, command: String },

    /// A `set` directive named a key op does not know.
    #[error("Unknown config key on line {line}: {key}")]
    UnknownKey { line: usize, key: String },

    /// A `set` directive without a key or value.
    #[error("Malformed config directive on line {line}: {text}")]
    MalformedDirective { line: usize, text: String },

    /// `HOME` is unset and the current user has no account record.
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// `~name` referenced an account that does not exist.
    #[error("Unknown user in path: ~{0}")]
    UnknownUser(String),

    /// The working directory could not be read (e.g. it was deleted).
    #[error("Could not determine current directory: {0}")]
    NoCurrentDir(std::io::Error),

    /// No `set sourceDir` directive was found.
    #[error("sourceDir is not set; add `set sourceDir <path>` to your config")]
    SourceDirUnset,

    /// The picker returned nothing.
    #[error("No {0} selected")]
    NoSelection(&'static str),

    /// The chosen action is not one of the known action names.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// The picker binary could not be started.
    #[error("Could not start picker '{program}': {source}")]
    PickerUnavailable {
        program: String,
        source: std::io::Error,
    },

    /// The picker exited with an unexpected status.
    #[error("Picker failed: {0}")]
    PickerFailed(String),

    /// A tmux command failed to execute.
    #[error("Tmux error: {0}")]
    TmuxError(String),

    /// An editor or shell process failed.
    #[error("{program} failed: {reason}")]
    ProcessFailed { program: String, reason: String },

    /// The effective configuration could not be rendered.
    #[error("Failed to render config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Convenient Result type alias for op operations.
pub type Result<T> = std::result::Result<T, OpError>;
