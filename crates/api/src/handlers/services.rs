//! Handlers for service status and lifecycle actions.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use svcdeck_core::services::ActionRequest;

use super::first_filled;
use crate::error::{AppError, AppResult};
use crate::response::{ActionResponse, ServicesResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /services/actions`.
///
/// Both fields are optional here so a missing field becomes a validation
/// error in the standard envelope rather than an extractor rejection. The
/// service may be named by `serviceName`, `service` or `service_name`; the
/// first filled one in that order wins.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBody {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default, rename = "service_name")]
    pub service_name_snake: Option<String>,
}

impl ActionBody {
    fn target_service(&self) -> Option<&str> {
        first_filled(&[
            self.service_name.as_deref(),
            self.service.as_deref(),
            self.service_name_snake.as_deref(),
        ])
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /services
///
/// Every service in the supervisor's process table, in supervisor order.
pub async fn list_services(State(state): State<AppState>) -> AppResult<Json<ServicesResponse>> {
    let services = state.control.list_services().await?;
    Ok(Json(ServicesResponse {
        success: true,
        services,
    }))
}

/// POST /services/actions
///
/// Run `restart`, `stop`, `start` or `delete` against one service. Input is
/// validated before any supervisor command runs.
pub async fn dispatch_action(
    State(state): State<AppState>,
    payload: Result<Json<ActionBody>, JsonRejection>,
) -> AppResult<Json<ActionResponse>> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let request = ActionRequest::parse(body.action.as_deref(), body.target_service())?;
    let result = state.control.dispatch(&request).await?;

    Ok(Json(ActionResponse::from(result)))
}
