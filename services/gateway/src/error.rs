use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardio_types::errors::{EngineError, SessionError};
use serde_json::json;
use thiserror::Error;

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Inputs locked: {0}")]
    InputsLocked(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Vitals(e) => AppError::InvalidInput(e.to_string()),
            EngineError::Session(e @ SessionError::InputsLocked) => {
                AppError::InputsLocked(e.to_string())
            }
            EngineError::Session(e @ SessionError::NotFound { .. }) => {
                AppError::NotFound(e.to_string())
            }
            // A classifier failure after startup is a model defect, not a client error
            EngineError::Classifier(e) => AppError::InternalError(anyhow::Error::new(e)),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => AppError::InvalidInput(e.body_text()),
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg, "INVALID_INPUT"),
            AppError::InputsLocked(msg) => (StatusCode::CONFLICT, msg, "INPUTS_LOCKED"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::InternalError(err) => {
                tracing::error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}
