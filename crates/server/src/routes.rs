use axum::{
    http::Method,
    routing::{get, patch},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{observability, types::Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod catalog;
pub mod contact;

/// Methods the frontend is allowed to use cross-origin.
pub const CORS_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PATCH, Method::OPTIONS];
pub const ALLOW_CREDENTIALS: bool = true;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: catalog reads, contact endpoints, health and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let catalog_routes = Router::new()
        .route("/advertisements", get(catalog::advertisements))
        .route("/ideas", get(catalog::ideas))
        .route("/students", get(catalog::students));

    let contact_routes = Router::new()
        .route("/api/contact", get(contact::list_messages).post(contact::submit))
        .route("/api/contact/:message_id", patch(contact::update_status));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(observability::metrics_handler))
        .merge(catalog_routes)
        .merge(contact_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
