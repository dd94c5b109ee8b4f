//! Service status query.
//!
//! Reads the supervisor's machine-readable process table (`pm2 jlist`) and
//! flattens each entry into a [`ServiceDescriptor`]. The decode is strict:
//! output that does not match [`ProcessEntry`] is a [`CoreError::Parse`],
//! never an empty list.

use serde::Deserialize;

use super::types::{ServiceDescriptor, ServiceStatus};
use super::{exit_failure, ServiceControl};
use crate::error::{CoreError, CoreResult};

/// One element of the `jlist` array. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ProcessEntry {
    name: String,
    #[serde(default)]
    pid: Option<u32>,
    #[serde(default)]
    monit: Monit,
    pm2_env: ProcessEnv,
}

#[derive(Debug, Default, Deserialize)]
struct Monit {
    #[serde(default)]
    memory: u64,
    #[serde(default)]
    cpu: f64,
}

#[derive(Debug, Deserialize)]
struct ProcessEnv {
    status: String,
    #[serde(default)]
    pm_uptime: Option<u64>,
    #[serde(default)]
    restart_time: u64,
}

impl From<ProcessEntry> for ServiceDescriptor {
    fn from(entry: ProcessEntry) -> Self {
        Self {
            name: entry.name,
            status: ServiceStatus::from_supervisor(&entry.pm2_env.status),
            cpu_percent: entry.monit.cpu.max(0.0),
            memory_bytes: entry.monit.memory,
            uptime_epoch_millis: entry.pm2_env.pm_uptime.unwrap_or(0),
            restart_count: entry.pm2_env.restart_time,
            // PM2 reports 0 for processes that are not running.
            pid: entry.pid.filter(|pid| *pid != 0),
        }
    }
}

/// Decode `jlist` output, preserving the supervisor's ordering.
pub fn parse_process_list(raw: &str) -> CoreResult<Vec<ServiceDescriptor>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::Parse("supervisor returned no output".to_string()));
    }
    let entries: Vec<ProcessEntry> =
        serde_json::from_str(raw).map_err(|e| CoreError::Parse(e.to_string()))?;

    let mut services = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.name.is_empty() {
            return Err(CoreError::Parse(
                "process entry with empty name".to_string(),
            ));
        }
        services.push(ServiceDescriptor::from(entry));
    }
    Ok(services)
}

impl ServiceControl {
    /// Snapshot of every service the supervisor manages.
    pub async fn list_services(&self) -> CoreResult<Vec<ServiceDescriptor>> {
        let command = self.supervisor().arg("jlist");
        let output = self.run(&command, self.config.query_timeout).await?;
        if !output.success() {
            return Err(exit_failure(&command, &output));
        }
        let services = parse_process_list(&output.stdout)?;
        tracing::debug!(count = services.len(), "Listed supervised services");
        Ok(services)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::exec::FakeExecutor;
    use crate::services::test_helpers::control_with;

    const JLIST: &str = r#"[
        {"pid": 4242, "name": "api-gateway", "pm_id": 0,
         "monit": {"memory": 52428800, "cpu": 3.5},
         "pm2_env": {"status": "online", "pm_uptime": 1700000000000, "restart_time": 2, "unstable_restarts": 0}},
        {"pid": 0, "name": "billing-worker", "pm_id": 1,
         "monit": {"memory": 0, "cpu": 0},
         "pm2_env": {"status": "stopped", "pm_uptime": 1690000000000, "restart_time": 0}},
        {"pid": 0, "name": "mailer", "pm_id": 2,
         "monit": {"memory": 0, "cpu": 0},
         "pm2_env": {"status": "errored", "restart_time": 15}}
    ]"#;

    #[test]
    fn parses_every_entry_in_order() {
        let services = parse_process_list(JLIST).unwrap();
        let names: Vec<_> = services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["api-gateway", "billing-worker", "mailer"]);

        let statuses: Vec<_> = services.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            [
                ServiceStatus::Online,
                ServiceStatus::Stopped,
                ServiceStatus::Errored
            ]
        );
    }

    #[test]
    fn flattens_nested_fields() {
        let services = parse_process_list(JLIST).unwrap();
        let api = &services[0];
        assert_eq!(api.pid, Some(4242));
        assert_eq!(api.memory_bytes, 52_428_800);
        assert_eq!(api.cpu_percent, 3.5);
        assert_eq!(api.uptime_epoch_millis, 1_700_000_000_000);
        assert_eq!(api.restart_count, 2);

        assert_eq!(services[1].pid, None, "pid 0 means not running");
        assert_eq!(services[2].uptime_epoch_millis, 0);
        assert_eq!(services[2].restart_count, 15);
    }

    #[test]
    fn empty_array_is_no_services() {
        assert!(parse_process_list("[]\n").unwrap().is_empty());
    }

    #[test]
    fn non_json_output_is_a_parse_error() {
        assert_matches!(
            parse_process_list("[PM2] Spawning PM2 daemon"),
            Err(CoreError::Parse(_))
        );
        assert_matches!(parse_process_list(""), Err(CoreError::Parse(_)));
    }

    #[test]
    fn shape_mismatch_is_a_parse_error() {
        // Missing pm2_env.
        assert_matches!(
            parse_process_list(r#"[{"name": "api"}]"#),
            Err(CoreError::Parse(_))
        );
        // Object instead of array.
        assert_matches!(
            parse_process_list(r#"{"name": "api"}"#),
            Err(CoreError::Parse(_))
        );
        // Negative memory.
        assert_matches!(
            parse_process_list(
                r#"[{"name": "api", "monit": {"memory": -1, "cpu": 0}, "pm2_env": {"status": "online"}}]"#
            ),
            Err(CoreError::Parse(_))
        );
    }

    #[tokio::test]
    async fn list_services_runs_jlist() {
        let fake = FakeExecutor::new().stdout("pm2 jlist", JLIST);
        let services = control_with(&fake).list_services().await.unwrap();
        assert_eq!(services.len(), 3);
        assert_eq!(fake.calls(), ["pm2 jlist"]);
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_execution_error() {
        let fake = FakeExecutor::new().fail("pm2 jlist", 1, "daemon not running");
        let err = control_with(&fake).list_services().await.unwrap_err();
        assert_matches!(err, CoreError::Execution(msg) if msg.contains("daemon not running"));
    }

    #[tokio::test]
    async fn timeout_is_surfaced() {
        let fake = FakeExecutor::new().time_out("pm2 jlist");
        let err = control_with(&fake).list_services().await.unwrap_err();
        assert_matches!(err, CoreError::Timeout { .. });
    }
}
