//! External tool execution.
//!
//! Docus drives two opaque command-line tools: the scaffolding generator and
//! the site builder. Both are run to completion through the platform shell
//! with stdin closed and stderr folded into stdout, so the captured output
//! keeps the order in which the tool wrote it.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured output of a successful tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Combined stdout and stderr.
    pub output: String,
}

/// Error returned by a [`ToolRunner`].
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The command could not be started.
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    /// The command ran and exited unsuccessfully.
    #[error("`{command}` exited with {}:\n{output}", describe_exit(*.code))]
    Failed {
        command: String,
        /// Exit code, `None` if the process was killed by a signal.
        code: Option<i32>,
        /// Combined stdout and stderr.
        output: String,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_owned(),
    }
}

/// Blocking runner for external commands.
pub trait ToolRunner: Send + Sync {
    /// Run `command` with `cwd` as working directory and wait for it.
    ///
    /// Returns the captured output on exit code 0.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Spawn`] if the command cannot be started and
    /// [`ToolError::Failed`] if it exits with a non-zero status.
    fn run(&self, command: &str, cwd: &Path) -> Result<ToolOutput, ToolError>;
}

/// [`ToolRunner`] that executes command lines through the system shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ToolRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<ToolOutput, ToolError> {
        tracing::debug!(command, cwd = %cwd.display(), "Running tool");

        let output = shell_command(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn {
                command: command.to_owned(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(ToolOutput { output: combined })
        } else {
            Err(ToolError::Failed {
                command: command.to_owned(),
                code: output.status.code(),
                output: combined,
            })
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(format!("exec 2>&1\n{command}"));
    cmd
}

#[cfg(target_os = "windows")]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(format!("{command} 2>&1"));
    cmd
}
