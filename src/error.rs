//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Failures produced by the classification engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Missing or empty image reference. Recoverable; surfaced as 400.
    #[error("{0}")]
    InvalidInput(String),

    /// Catalog or history lookup miss. Surfaced as 404.
    #[error("{0} not found")]
    NotFound(String),

    /// Catalog/weight invariant violation. Only reachable while wiring the
    /// engine, never from a request.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// Catch-all for unexpected sampler/assembler faults. Fatal to the
    /// request, not to the process.
    #[error("analysis failed: {0}")]
    AnalysisFailure(String),
}

#[derive(Debug)]
pub enum AppError {
    // Resource errors
    NotFound(String),

    // Validation errors
    ValidationError(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message
        }));

        (status, body).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match &err {
            EngineError::InvalidInput(_) => AppError::ValidationError(err.to_string()),
            EngineError::NotFound(_) => AppError::NotFound(err.to_string()),
            EngineError::InvalidConfig(_) | EngineError::AnalysisFailure(_) => {
                AppError::InternalError(err.to_string())
            }
        }
    }
}
