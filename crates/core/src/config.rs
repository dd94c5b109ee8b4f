use std::time::Duration;

/// Default supervisor executable, resolved through `PATH`.
pub const DEFAULT_SUPERVISOR_BIN: &str = "pm2";

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LOG_TIMEOUT: Duration = Duration::from_secs(10);

/// The machine whose supervisor is being managed.
///
/// Only identifies the host; commands always run on the local machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedHost {
    pub host: String,
    pub port: Option<u16>,
    pub user: Option<String>,
}

/// Settings injected into [`ServiceControl`](crate::services::ServiceControl).
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Supervisor executable (default: `pm2`).
    pub binary: String,
    /// Budget for `jlist` (default: 10s).
    pub query_timeout: Duration,
    /// Budget for each lifecycle command and for the follow-up `save`
    /// (default: 30s).
    pub action_timeout: Duration,
    /// Budget for log tails (default: 10s).
    pub log_timeout: Duration,
    pub managed_host: Option<ManagedHost>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_SUPERVISOR_BIN.to_string(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            action_timeout: DEFAULT_ACTION_TIMEOUT,
            log_timeout: DEFAULT_LOG_TIMEOUT,
            managed_host: None,
        }
    }
}
