use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// Error response in the `{"detail": {"success": false, "message": ...}}` shape the frontend reads.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Map a service error, using `internal_message` for failures the client cannot fix.
    pub fn from_service(e: ServiceError, internal_message: &str) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::InvalidEmail(addr) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("value is not a valid email address: {addr}"),
            ),
            other => {
                error!(error = %other, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, internal_message)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "detail": {"success": false, "message": self.message}
        });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("initialization failed: {0}")]
    Init(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl From<ServiceError> for StartupError {
    fn from(e: ServiceError) -> Self {
        Self::Init(e.to_string())
    }
}
