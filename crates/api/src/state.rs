use std::sync::Arc;

use svcdeck_core::services::ServiceControl;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Supervisor front door used by every service handler.
    pub control: Arc<ServiceControl>,
}
