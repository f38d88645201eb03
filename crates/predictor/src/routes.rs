use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::Method,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, warn, Level};

use common::observability::{self, PREDICTIONS_TOTAL, PREDICTION_DURATION};
use common::types::ServiceHealth;
use models::prediction::{PredictionRequest, PredictionResponse};

use crate::bundle::ModelBundle;
use crate::errors::PredictApiError;

pub const CORS_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];
/// The prediction API is anonymous; browsers must not send credentials to it.
pub const ALLOW_CREDENTIALS: bool = false;

/// `model` is `None` when the artifact could not be loaded at startup.
#[derive(Clone, Default)]
pub struct PredictorState {
    pub model: Option<Arc<ModelBundle>>,
}

pub async fn health(State(state): State<PredictorState>) -> Json<ServiceHealth> {
    Json(ServiceHealth { status: "ok", model_loaded: state.model.is_some() })
}

pub async fn predict_success(
    State(state): State<PredictorState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, PredictApiError> {
    let Some(model) = state.model.as_ref() else {
        PREDICTIONS_TOTAL.with_label_values(&["unavailable"]).inc();
        return Err(PredictApiError::ModelNotLoaded);
    };

    let reject = |reason: String| {
        PREDICTIONS_TOTAL.with_label_values(&["invalid"]).inc();
        warn!(%reason, "rejecting prediction input");
        PredictApiError::InvalidInput(reason)
    };

    let Json(req) = payload.map_err(|e| reject(e.body_text()))?;
    debug!(?req, "received data for prediction");

    let started = Instant::now();
    let probability = model
        .success_probability(&req)
        .map_err(|e| reject(e.to_string()))?;
    PREDICTION_DURATION.observe(started.elapsed().as_secs_f64());
    PREDICTIONS_TOTAL.with_label_values(&["ok"]).inc();
    info!(success_probability = format_args!("{probability:.2}"), "prediction served");

    Ok(Json(PredictionResponse { success_probability: probability }))
}

/// CORS applies to `/api/*` only; health and metrics are for local probes.
pub fn build_router(state: PredictorState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/predict-success", post(predict_success))
        .layer(cors);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(observability::metrics_handler))
        .merge(api)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
