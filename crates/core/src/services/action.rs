//! Lifecycle actions and their supervisor commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::require_service_name;
use crate::error::{CoreError, CoreResult};

/// The closed set of state transitions a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleAction {
    Restart,
    Stop,
    Start,
    Delete,
}

impl LifecycleAction {
    pub const ALL: [LifecycleAction; 4] = [
        LifecycleAction::Restart,
        LifecycleAction::Stop,
        LifecycleAction::Start,
        LifecycleAction::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Stop => "stop",
            Self::Start => "start",
            Self::Delete => "delete",
        }
    }

    /// The supervisor subcommand implementing this action.
    pub fn supervisor_verb(self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Stop => "stop",
            Self::Start => "start",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid action '{s}': expected one of restart, stop, start, delete"
                ))
            })
    }
}

/// A validated request to run one action against one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: LifecycleAction,
    pub service_name: String,
}

impl ActionRequest {
    /// Build a request from untrusted boundary input.
    pub fn parse(action: Option<&str>, service_name: Option<&str>) -> CoreResult<Self> {
        let action = action.map(str::trim).unwrap_or_default();
        if action.is_empty() {
            return Err(CoreError::Validation("Missing action parameter".to_string()));
        }
        let action = action.parse::<LifecycleAction>()?;
        let service_name = require_service_name(service_name, "Missing serviceName parameter")?;
        Ok(Self {
            action,
            service_name: service_name.to_string(),
        })
    }
}

/// Outcome of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub action: LifecycleAction,
    pub service_name: String,
    pub standard_output: String,
    pub standard_error: String,
    /// Both the action and the follow-up `save` exited cleanly.
    pub succeeded: bool,
}
