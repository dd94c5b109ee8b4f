//! Local subprocess execution.
//!
//! [`LocalExecutor`] runs commands on the current host with
//! [`tokio::process`], capturing both output streams and enforcing the
//! caller's timeout.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{CommandError, CommandExecutor, CommandLine, CommandOutput};

/// Maximum stdout or stderr size captured per stream (10 MiB).
///
/// Output beyond this is discarded so a runaway log tail cannot exhaust
/// memory.
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Executor that spawns one OS process per call on the local host.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalExecutor;

#[async_trait]
impl CommandExecutor for LocalExecutor {
    async fn execute(
        &self,
        command: &CommandLine,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        run_command(&mut cmd, command, timeout).await
    }
}

/// Spawn `cmd`, capture stdout/stderr, and kill the child if `timeout`
/// elapses first.
///
/// The budget covers draining both pipes as well as the exit, so a
/// background grandchild that keeps a pipe open cannot stretch the call.
async fn run_command(
    cmd: &mut Command,
    command: &CommandLine,
    timeout: Duration,
) -> Result<CommandOutput, CommandError> {
    // `kill_on_drop(true)` guarantees the child is reaped even if this future
    // is cancelled by an outer timeout.
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();

    let mut child = cmd.spawn().map_err(|source| CommandError::Spawn {
        program: command.program.clone(),
        source,
    })?;

    // Read both pipes concurrently so a chatty stderr cannot block the child
    // while we wait on it.
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let rendered = command.to_string();
    let stdout_command = rendered.clone();
    let stderr_command = rendered.clone();
    let mut stdout_task =
        tokio::spawn(async move { read_stream(stdout_handle, &stdout_command, "stdout").await });
    let mut stderr_task =
        tokio::spawn(async move { read_stream(stderr_handle, &stderr_command, "stderr").await });

    let completion = tokio::time::timeout(timeout, async {
        let status = child.wait().await;
        let stdout_bytes = (&mut stdout_task).await.unwrap_or_default();
        let stderr_bytes = (&mut stderr_task).await.unwrap_or_default();
        (status, stdout_bytes, stderr_bytes)
    })
    .await;

    match completion {
        Ok((Ok(status), stdout_bytes, stderr_bytes)) => Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
            exit_code: status.code().unwrap_or(-1),
            duration_ms: start.elapsed().as_millis() as u64,
        }),
        Ok((Err(source), _, _)) => Err(CommandError::Io {
            command: rendered,
            source,
        }),
        Err(_elapsed) => {
            let elapsed_ms = start.elapsed().as_millis() as u64;
            // The direct child may already have exited while a grandchild
            // holds the pipes.
            if let Ok(None) = child.try_wait() {
                if let Err(e) = child.kill().await {
                    tracing::warn!(command = %command, error = %e, "Failed to kill timed-out child");
                }
            }
            stdout_task.abort();
            stderr_task.abort();
            tracing::warn!(command = %command, elapsed_ms, "Command timed out, child killed");
            Err(CommandError::Timeout {
                command: rendered,
                elapsed_ms,
            })
        }
    }
}

/// Read an entire output stream into a byte buffer, capped at [`MAX_OUTPUT_BYTES`].
///
/// Bytes past the cap are drained and dropped so the writer never blocks on
/// a full pipe.
async fn read_stream<R: AsyncRead + Unpin>(
    handle: Option<R>,
    command: &str,
    stream: &'static str,
) -> Vec<u8> {
    let mut buf = Vec::new();
    let Some(mut h) = handle else {
        return buf;
    };

    if let Err(e) = (&mut h)
        .take(MAX_OUTPUT_BYTES as u64)
        .read_to_end(&mut buf)
        .await
    {
        tracing::warn!(command, stream, error = %e, "Failed to read command output");
        return buf;
    }

    if buf.len() >= MAX_OUTPUT_BYTES {
        match tokio::io::copy(&mut h, &mut tokio::io::sink()).await {
            Ok(0) => {}
            Ok(discarded) => tracing::warn!(
                command,
                stream,
                kept_bytes = buf.len(),
                discarded_bytes = discarded,
                "Command output truncated",
            ),
            Err(e) => {
                tracing::warn!(command, stream, error = %e, "Failed to drain command output")
            }
        }
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
