//! Digital Journey: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use journey_core::error::JourneyError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The bundled catalog failed to load.
    #[error("catalog error: {0}")]
    Catalog(#[from] JourneyError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Where the client should go after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    /// Back to screen 1.
    Restart,
    /// Back to the gate.
    ReturnToStart,
    /// Try the same request again.
    Retry,
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Suggested escape hatch.
    pub recovery: Recovery,
}

/// HTTP-layer wrapper around `JourneyError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub JourneyError);

impl From<JourneyError> for ApiError {
    fn from(err: JourneyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, recovery) = match &self.0 {
            JourneyError::ScreenNotFound(_) => {
                (StatusCode::NOT_FOUND, "screen_not_found", Recovery::Restart)
            }
            JourneyError::InvalidScreenId(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_screen_id",
                Recovery::ReturnToStart,
            ),
            JourneyError::AlreadyInFlight(_) => {
                (StatusCode::CONFLICT, "already_in_flight", Recovery::Retry)
            }
            JourneyError::InvalidTransition(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_transition",
                Recovery::Restart,
            ),
            JourneyError::Catalog(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "catalog_error",
                Recovery::ReturnToStart,
            ),
            JourneyError::Playback(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "playback_error",
                Recovery::Retry,
            ),
            JourneyError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "infrastructure_error",
                Recovery::ReturnToStart,
            ),
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
            recovery,
        };

        (status, Json(body)).into_response()
    }
}
