//! Log tail retrieval.
//!
//! Both modes run `<supervisor> logs <service> --lines N --nostream`. Array
//! mode adds `--raw` so lines carry no supervisor prefixes, then drops blank
//! lines.

use serde::Serialize;

use super::validation::{
    require_service_name, resolve_line_count, DEFAULT_ARRAY_LINES, DEFAULT_SNAPSHOT_LINES,
};
use super::{exit_failure, ServiceControl};
use crate::error::CoreResult;
use crate::exec::CommandLine;

pub const MISSING_SERVICE_MESSAGE: &str = "Missing service parameter";

/// A validated log tail request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub service_name: String,
    pub line_count: u32,
}

impl LogQuery {
    /// Query for snapshot mode; `line_count` defaults to 100.
    pub fn snapshot(service_name: Option<&str>, line_count: Option<u32>) -> CoreResult<Self> {
        Self::build(service_name, line_count, DEFAULT_SNAPSHOT_LINES)
    }

    /// Query for array mode; `line_count` defaults to 50.
    pub fn array(service_name: Option<&str>, line_count: Option<u32>) -> CoreResult<Self> {
        Self::build(service_name, line_count, DEFAULT_ARRAY_LINES)
    }

    fn build(service_name: Option<&str>, line_count: Option<u32>, default: u32) -> CoreResult<Self> {
        let service_name = require_service_name(service_name, MISSING_SERVICE_MESSAGE)?;
        let line_count = resolve_line_count(line_count, default)?;
        Ok(Self {
            service_name: service_name.to_string(),
            line_count,
        })
    }
}

/// Raw captured text from both log streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSnapshot {
    pub logs: String,
    pub errors: String,
}

fn logs_command(binary: &str, query: &LogQuery, raw: bool) -> CommandLine {
    let cmd = CommandLine::new(binary)
        .arg("logs")
        .arg(&query.service_name)
        .arg("--lines")
        .arg(query.line_count.to_string())
        .arg("--nostream");
    if raw {
        cmd.arg("--raw")
    } else {
        cmd
    }
}

/// Split raw output into non-blank lines, keeping at most the last `limit`.
pub fn non_blank_tail(raw: &str, limit: usize) -> Vec<String> {
    let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();
    let skip = lines.len().saturating_sub(limit);
    lines[skip..].iter().map(|l| (*l).to_string()).collect()
}

impl ServiceControl {
    /// Last `line_count` lines of the service's output and error logs, as
    /// the supervisor printed them.
    pub async fn fetch_logs(&self, query: &LogQuery) -> CoreResult<LogSnapshot> {
        let command = logs_command(&self.config.binary, query, false);
        let output = self.run(&command, self.config.log_timeout).await?;
        if !output.success() {
            return Err(exit_failure(&command, &output));
        }
        Ok(LogSnapshot {
            logs: output.stdout,
            errors: output.stderr,
        })
    }

    /// Last `line_count` non-blank log lines, without supervisor formatting.
    pub async fn fetch_log_lines(&self, query: &LogQuery) -> CoreResult<Vec<String>> {
        let command = logs_command(&self.config.binary, query, true);
        let output = self.run(&command, self.config.log_timeout).await?;
        if !output.success() {
            return Err(exit_failure(&command, &output));
        }
        Ok(non_blank_tail(&output.stdout, query.line_count as usize))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
