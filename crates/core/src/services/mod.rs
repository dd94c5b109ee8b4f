//! Service control: status queries, lifecycle actions and log tails.
//!
//! [`ServiceControl`] is the single entry point. It holds no state between
//! calls apart from its configuration; every operation is a fresh supervisor
//! invocation through the injected [`CommandExecutor`].

pub mod action;
pub mod dispatch;
pub mod logs;
pub mod status;
pub mod types;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use crate::config::SupervisorConfig;
use crate::error::CoreError;
use crate::exec::{CommandError, CommandExecutor, CommandLine, CommandOutput};

pub use action::{ActionRequest, ActionResult, LifecycleAction};
pub use logs::{LogQuery, LogSnapshot};
pub use types::{ServiceDescriptor, ServiceStatus};

/// Front door to the process supervisor.
///
/// Cheap to share behind an `Arc`; concurrent calls are not serialized, so
/// two simultaneous actions on the same service race at the supervisor.
pub struct ServiceControl {
    executor: Arc<dyn CommandExecutor>,
    config: SupervisorConfig,
}

impl ServiceControl {
    pub fn new(executor: Arc<dyn CommandExecutor>, config: SupervisorConfig) -> Self {
        Self { executor, config }
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// A command line starting with the supervisor binary.
    fn supervisor(&self) -> CommandLine {
        CommandLine::new(&self.config.binary)
    }

    async fn run(
        &self,
        command: &CommandLine,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        tracing::debug!(command = %command, timeout_ms = timeout.as_millis() as u64, "Running supervisor command");
        let output = self.executor.execute(command, timeout).await?;
        tracing::debug!(
            command = %command,
            exit_code = output.exit_code,
            duration_ms = output.duration_ms,
            "Supervisor command finished",
        );
        Ok(output)
    }
}

/// Error for a supervisor command that ran but reported failure.
fn exit_failure(command: &CommandLine, output: &CommandOutput) -> CoreError {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        CoreError::Execution(format!(
            "`{command}` exited with status {}",
            output.exit_code
        ))
    } else {
        CoreError::Execution(format!(
            "`{command}` exited with status {}: {stderr}",
            output.exit_code
        ))
    }
}
