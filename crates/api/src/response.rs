//! Response envelope types for API handlers.
//!
//! Every body carries a `success` flag. Failures always use
//! [`FailureResponse`]; the success shapes differ per operation because
//! dashboard callers consume them differently.

use serde::Serialize;
use svcdeck_core::services::{ActionResult, LifecycleAction, ServiceDescriptor};

/// `{ "success": false, "error": "..." }`
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    pub success: bool,
    pub services: Vec<ServiceDescriptor>,
}

/// `error` carries the captured stderr even though the request succeeded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub success: bool,
    pub action: LifecycleAction,
    pub service_name: String,
    pub output: String,
    pub error: String,
}

impl From<ActionResult> for ActionResponse {
    fn from(result: ActionResult) -> Self {
        Self {
            success: true,
            action: result.action,
            service_name: result.service_name,
            output: result.standard_output,
            error: result.standard_error,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSnapshotResponse {
    pub success: bool,
    pub service_name: String,
    pub logs: String,
    pub errors: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLinesResponse {
    pub success: bool,
    pub service_name: String,
    pub logs: Vec<String>,
}
