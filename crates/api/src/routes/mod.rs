pub mod health;
pub mod services;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /services                list supervised services (GET)
/// /services/actions        restart | stop | start | delete (POST)
/// /services/logs           log tail: raw text (GET), line array (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(services::router())
}
