//! Handlers for log tail retrieval.
//!
//! `GET` returns the supervisor's raw text for display; `POST` returns
//! discrete non-blank lines for programmatic consumers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use svcdeck_core::services::LogQuery;

use super::first_filled;
use crate::error::{AppError, AppResult};
use crate::response::{LogLinesResponse, LogSnapshotResponse};
use crate::state::AppState;

/// Query parameters for `GET /services/logs`.
///
/// `service`/`lines` take precedence over `serviceName`/`lineCount` when a
/// query carries both spellings.
#[derive(Debug, Default, Deserialize)]
pub struct LogParams {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default, rename = "serviceName")]
    pub service_name: Option<String>,
    #[serde(default)]
    pub lines: Option<u32>,
    #[serde(default, rename = "lineCount")]
    pub line_count: Option<u32>,
}

/// Body of `POST /services/logs`.
///
/// `serviceName`/`lineCount` take precedence over `service`/`lines`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogBody {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub line_count: Option<u32>,
    #[serde(default)]
    pub lines: Option<u32>,
}

/// GET /services/logs?service=&lines=
///
/// `lines` defaults to 100.
pub async fn get_logs(
    State(state): State<AppState>,
    params: Result<Query<LogParams>, QueryRejection>,
) -> AppResult<Json<LogSnapshotResponse>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let service = first_filled(&[params.service.as_deref(), params.service_name.as_deref()]);
    let query = LogQuery::snapshot(service, params.lines.or(params.line_count))?;
    let snapshot = state.control.fetch_logs(&query).await?;

    Ok(Json(LogSnapshotResponse {
        success: true,
        service_name: query.service_name,
        logs: snapshot.logs,
        errors: snapshot.errors,
    }))
}

/// POST /services/logs
///
/// `lineCount` defaults to 50.
pub async fn post_logs(
    State(state): State<AppState>,
    payload: Result<Json<LogBody>, JsonRejection>,
) -> AppResult<Json<LogLinesResponse>> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let service = first_filled(&[body.service_name.as_deref(), body.service.as_deref()]);
    let query = LogQuery::array(service, body.line_count.or(body.lines))?;
    let logs = state.control.fetch_log_lines(&query).await?;

    Ok(Json(LogLinesResponse {
        success: true,
        service_name: query.service_name,
        logs,
    }))
}
