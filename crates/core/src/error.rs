use crate::exec::CommandError;

/// Errors surfaced by the service control layer.
///
/// `Validation` is always detected before any subprocess is spawned. The
/// other variants describe a supervisor invocation that could not produce a
/// usable result.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Execution failed: {0}")]
    Execution(String),

    #[error("Unparseable supervisor output: {0}")]
    Parse(String),

    #[error("Command `{command}` timed out after {elapsed_ms}ms")]
    Timeout { command: String, elapsed_ms: u64 },
}

impl CoreError {
    /// The message shown to callers, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Execution(msg) | Self::Parse(msg) => msg.clone(),
            Self::Timeout { .. } => self.to_string(),
        }
    }
}

impl From<CommandError> for CoreError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Timeout {
                command,
                elapsed_ms,
            } => Self::Timeout {
                command,
                elapsed_ms,
            },
            other => Self::Execution(other.to_string()),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
