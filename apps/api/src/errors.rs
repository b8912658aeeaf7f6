use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of the classification core.
///
/// `ArtifactLoad` and `ResourceUnavailable` only occur while building the
/// engine or the linguistic resources, and the host treats both as fatal.
/// `Inference` is scoped to a single `predict` call.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to load artifact '{artifact}': {reason}")]
    ArtifactLoad { artifact: String, reason: String },

    #[error("linguistic resource '{resource}' is unavailable: {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    #[error("inference failed: {0}")]
    Inference(String),
}

impl CoreError {
    pub fn artifact(artifact: impl Into<String>, reason: impl ToString) -> Self {
        CoreError::ArtifactLoad {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }

    pub fn resource(resource: impl Into<String>, reason: impl ToString) -> Self {
        CoreError::ResourceUnavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

/// HTTP-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Inference(msg) => AppError::Inference(msg),
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Inference(msg) => {
                tracing::error!("Inference error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INFERENCE_ERROR",
                    "An error occurred during recommendation".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
