//! Route definitions for service control endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{logs, services};
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
///
/// ```text
/// GET  /services           -> list_services
/// POST /services/actions   -> dispatch_action
/// GET  /services/logs      -> get_logs   (raw text)
/// POST /services/logs      -> post_logs  (line array)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(services::list_services))
        .route("/services/actions", post(services::dispatch_action))
        .route("/services/logs", get(logs::get_logs).post(logs::post_logs))
}
