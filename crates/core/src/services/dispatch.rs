//! Lifecycle action dispatch.
//!
//! Runs `<supervisor> <verb> <service>` followed by `<supervisor> save`, so
//! a definition change survives a supervisor restart. The save runs whether
//! or not the action succeeded; its failure is reported in the result's
//! stderr rather than failing the request, because the action may already
//! have changed supervisor state.

use std::time::Instant;

use super::action::{ActionRequest, ActionResult};
use super::{exit_failure, ServiceControl};
use crate::error::{CoreError, CoreResult};
use crate::exec::CommandLine;

/// Build the command implementing `request`.
pub fn action_command(binary: &str, request: &ActionRequest) -> CommandLine {
    CommandLine::new(binary)
        .arg(request.action.supervisor_verb())
        .arg(&request.service_name)
}

/// Append `text` to `buf`, keeping entries on separate lines.
fn append_line(buf: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !buf.is_empty() && !buf.ends_with('\n') {
        buf.push('\n');
    }
    buf.push_str(text);
}

impl ServiceControl {
    /// Execute a validated action and persist the resulting process table.
    ///
    /// Returns [`CoreError::Execution`] when the action command itself exits
    /// non-zero (for example `delete` on a service that no longer exists).
    /// A timed-out action is not followed by a save.
    pub async fn dispatch(&self, request: &ActionRequest) -> CoreResult<ActionResult> {
        let start = Instant::now();
        let command = action_command(&self.config.binary, request);

        tracing::info!(
            action = %request.action,
            service = %request.service_name,
            "Dispatching lifecycle action",
        );

        let action_output = match self.run(&command, self.config.action_timeout).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(
                    action = %request.action,
                    service = %request.service_name,
                    error = %e,
                    "Lifecycle action did not complete",
                );
                return Err(CoreError::from(e));
            }
        };

        let mut standard_output = action_output.stdout.clone();
        let mut standard_error = action_output.stderr.clone();

        let save = self.supervisor().arg("save");
        let persisted = match self.run(&save, self.config.action_timeout).await {
            Ok(output) => {
                append_line(&mut standard_output, &output.stdout);
                append_line(&mut standard_error, &output.stderr);
                if !output.success() {
                    append_line(
                        &mut standard_error,
                        &format!("`{save}` exited with status {}", output.exit_code),
                    );
                }
                output.success()
            }
            Err(e) => {
                append_line(&mut standard_error, &e.to_string());
                false
            }
        };

        if !persisted {
            tracing::warn!(
                service = %request.service_name,
                "Process table could not be persisted after action",
            );
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;

        if !action_output.success() {
            tracing::error!(
                action = %request.action,
                service = %request.service_name,
                exit_code = action_output.exit_code,
                elapsed_ms,
                stderr = %action_output.stderr.trim(),
                "Lifecycle action failed",
            );
            return Err(exit_failure(&command, &action_output));
        }

        tracing::info!(
            action = %request.action,
            service = %request.service_name,
            persisted,
            elapsed_ms,
            "Lifecycle action succeeded",
        );

        Ok(ActionResult {
            action: request.action,
            service_name: request.service_name.clone(),
            standard_output,
            standard_error,
            succeeded: persisted,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
