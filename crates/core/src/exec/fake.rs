//! Scripted in-memory executor for tests.
//!
//! [`FakeExecutor`] never spawns a process. Responses are keyed on the
//! rendered command line (`"pm2 restart api"`), and every invocation is
//! recorded so tests can assert how many commands ran and in which order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use super::executor::{CommandError, CommandExecutor, CommandLine, CommandOutput};

/// What the fake returns for a given command.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Output(CommandOutput),
    Timeout,
    SpawnFailure,
}

#[derive(Debug)]
struct Script {
    responses: HashMap<String, FakeResponse>,
    fallback: FakeResponse,
    delay: Duration,
    calls: Vec<String>,
}

/// Cloneable handle; clones share the same script and call log.
#[derive(Debug, Clone)]
pub struct FakeExecutor {
    inner: Arc<Mutex<Script>>,
}

impl Default for FakeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeExecutor {
    /// Every unscripted command succeeds with empty output.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Script {
                responses: HashMap::new(),
                fallback: FakeResponse::Output(CommandOutput::default()),
                delay: Duration::ZERO,
                calls: Vec::new(),
            })),
        }
    }

    pub fn respond(self, command: &str, response: FakeResponse) -> Self {
        self.lock().responses.insert(command.to_string(), response);
        self
    }

    /// Exit 0 with the given stdout.
    pub fn stdout(self, command: &str, stdout: &str) -> Self {
        self.respond(
            command,
            FakeResponse::Output(CommandOutput {
                stdout: stdout.to_string(),
                ..Default::default()
            }),
        )
    }

    /// Exit with `exit_code` and the given stderr.
    pub fn fail(self, command: &str, exit_code: i32, stderr: &str) -> Self {
        self.respond(
            command,
            FakeResponse::Output(CommandOutput {
                stderr: stderr.to_string(),
                exit_code,
                ..Default::default()
            }),
        )
    }

    pub fn time_out(self, command: &str) -> Self {
        self.respond(command, FakeResponse::Timeout)
    }

    /// Response used for any command without a scripted entry.
    pub fn fallback(self, response: FakeResponse) -> Self {
        self.lock().fallback = response;
        self
    }

    /// Sleep this long before answering each command, ignoring the
    /// caller's timeout.
    pub fn delay(self, delay: Duration) -> Self {
        self.lock().delay = delay;
        self
    }

    /// Rendered command lines in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CommandExecutor for FakeExecutor {
    async fn execute(
        &self,
        command: &CommandLine,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        let rendered = command.to_string();
        let (response, delay) = {
            let mut script = self.lock();
            script.calls.push(rendered.clone());
            let response = script
                .responses
                .get(&rendered)
                .cloned()
                .unwrap_or_else(|| script.fallback.clone());
            (response, script.delay)
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match response {
            FakeResponse::Output(output) => Ok(output),
            FakeResponse::Timeout => Err(CommandError::Timeout {
                command: rendered,
                elapsed_ms: timeout.as_millis() as u64,
            }),
            FakeResponse::SpawnFailure => Err(CommandError::Spawn {
                program: command.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            }),
        }
    }
}
