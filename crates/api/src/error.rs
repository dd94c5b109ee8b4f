use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use svcdeck_core::error::CoreError;

use crate::response::FailureResponse;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as the `{ "success": false, "error": ... }`
/// envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `svcdeck_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Malformed request (unparseable body or query string).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(CoreError::Validation(_)) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Core(CoreError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Core(CoreError::Execution(_) | CoreError::Parse(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Core(core) => core.message(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Supervisor request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Rejected request");
        }

        (status, axum::Json(FailureResponse::new(message))).into_response()
    }
}
