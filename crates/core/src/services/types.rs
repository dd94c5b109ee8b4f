use serde::Serialize;

/// Run state of a supervised service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Online,
    Stopped,
    Errored,
    Launching,
    Unknown,
}

impl ServiceStatus {
    /// Map a supervisor status string. `stopping` is folded into `Stopped`;
    /// anything unrecognised is `Unknown`.
    pub fn from_supervisor(raw: &str) -> Self {
        match raw {
            "online" => Self::Online,
            "stopped" | "stopping" => Self::Stopped,
            "errored" => Self::Errored,
            "launching" => Self::Launching,
            _ => Self::Unknown,
        }
    }
}

/// Point-in-time view of one service in the supervisor's process table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub name: String,
    pub status: ServiceStatus,
    pub cpu_percent: f64,
    pub memory_bytes: u64,
    /// Epoch millis at which the current run started.
    pub uptime_epoch_millis: u64,
    pub restart_count: u64,
    pub pid: Option<u32>,
}
