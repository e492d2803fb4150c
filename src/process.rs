//! Blocking subprocess execution behind a small trait so workflows can be
//! exercised without real `git` or `bws` binaries.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use crate::error::{Result, SetupError};
use crate::logging::redact;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait CommandRunner {
    /// Runs `program` with `args` to completion and captures its output.
    ///
    /// Only a failure to start the process is an error; a nonzero exit is
    /// reported through [`CommandOutput::code`].
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandOutput>;

    /// Like [`run`](Self::run) but turns a nonzero exit into [`SetupError::CommandFailed`].
    fn run_checked(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> Result<CommandOutput> {
        let output = self.run(program, args, cwd)?;
        if output.success() {
            Ok(output)
        } else {
            Err(SetupError::CommandFailed {
                command: display_command(program, args),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}

/// Runs real processes through [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandOutput> {
        let shown = display_command(program, args);
        match cwd {
            Some(dir) => tracing::info!(command = %shown, cwd = %dir.display(), "Running command"),
            None => tracing::info!(command = %shown, "Running command"),
        }

        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => SetupError::CommandNotFound(program.to_string()),
            _ => SetupError::Io(e),
        })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        // stdout may hold a token (`bws secret get`, `git config --get`); log its size only.
        tracing::debug!(command = %shown, stdout_bytes = result.stdout.len(), "Command finished");
        if !result.success() {
            tracing::warn!(
                command = %shown,
                code = ?result.code,
                stderr = %redact(result.stderr.trim()),
                "Command exited unsuccessfully"
            );
        }

        Ok(result)
    }
}

/// Renders a command line for logs and error messages.
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|part| {
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("'{}'", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
