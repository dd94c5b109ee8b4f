//! Command execution interface and shared types.
//!
//! Defines [`CommandExecutor`], the seam through which every supervisor
//! invocation flows, along with [`CommandLine`], [`CommandOutput`], and
//! [`CommandError`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

/// A program plus its argument vector.
///
/// Arguments are passed to the OS verbatim; no shell is involved, so service
/// names can never be interpreted as shell syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a command that ran to completion.
///
/// A non-zero `exit_code` is still an `Ok` result: some supervisor
/// subcommands print warnings on stderr while succeeding, so interpreting the
/// exit status is left to the caller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandOutput {
    /// Complete stdout captured from the process.
    pub stdout: String,
    /// Complete stderr captured from the process.
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Errors that prevent a command from producing a [`CommandOutput`].
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The process could not be started at all.
    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process started but waiting on it failed.
    #[error("I/O error while running `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exceeded its wall-clock budget and was killed.
    #[error("Command `{command}` timed out after {elapsed_ms}ms")]
    Timeout { command: String, elapsed_ms: u64 },
}

/// Runs a single external command to completion.
///
/// Implementations must enforce `timeout` and terminate the child when it
/// fires. [`LocalExecutor`](super::subprocess::LocalExecutor) spawns on the
/// current host; tests substitute `FakeExecutor`.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(
        &self,
        command: &CommandLine,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError>;
}
