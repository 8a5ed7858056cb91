//! Interactive selection via fzf.
//!
//! The picker receives a newline-separated list on stdin and prints the
//! chosen line on stdout, or nothing if the user cancels.

use crate::error::{OpError, Result};
use crate::listing::join_entries;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Something that lets the user choose one line from a list.
pub trait Picker {
    /// Present `choices` and return the selected line.
    ///
    /// Returns `Ok(None)` when the user cancels or nothing matches.
    fn pick(&self, prompt: &str, choices: &[String]) -> Result<Option<String>>;
}

/// Picker backed by the `fzf` binary.
#[derive(Debug, Clone)]
pub struct FzfPicker {
    program: String,
}

impl FzfPicker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Map fzf's exit status and output to a selection.
    fn interpret(&self, code: Option<i32>, stdout: &[u8]) -> Result<Option<String>> {
        match code {
            Some(0) => Ok(first_line(stdout)),
            // 1: no match, 130: interrupted with Esc or Ctrl-C
            Some(1) | Some(130) => Ok(None),
            Some(code) => Err(OpError::PickerFailed(format!(
                "{} exited with status {}",
                self.program, code
            ))),
            None => Err(OpError::PickerFailed(format!(
                "{} was terminated by a signal",
                self.program
            ))),
        }
    }
}

impl Default for FzfPicker {
    fn default() -> Self {
        Self::new("fzf")
    }
}

impl Picker for FzfPicker {
    fn pick(&self, prompt: &str, choices: &[String]) -> Result<Option<String>> {
        let prompt_arg = format!("{}> ", prompt);
        debug!(program = %self.program, prompt, count = choices.len(), "starting picker");

        // stderr stays inherited: fzf draws its UI there and reads keys from /dev/tty.
        let mut child = Command::new(&self.program)
            .args(["--prompt", &prompt_arg])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| OpError::PickerUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // fzf may exit (e.g. on Esc) before reading everything.
            if let Err(e) = stdin.write_all(join_entries(choices).as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        self.interpret(output.status.code(), &output.stdout)
    }
}

/// First non-empty output line, without its line ending.
fn first_line(stdout: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .next()
        .map(str::to_string)
        .filter(|line| !line.is_empty())
}
