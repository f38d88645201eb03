use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("unknown {feature} label: {label}")]
    UnknownLabel { feature: String, label: String },
    #[error("expected {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },
    #[error("dataset error: {0}")]
    Dataset(String),
    #[error("invalid model artifact: {0}")]
    InvalidModel(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors returned by the prediction endpoint as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum PredictApiError {
    #[error("AI model is not loaded on the server.")]
    ModelNotLoaded,
    #[error("Invalid input data for prediction. Please check the values.")]
    InvalidInput(String),
}

impl IntoResponse for PredictApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::ModelNotLoaded => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}
