use axum::{extract::State, Json};
use serde_json::{Map, Value};

use service::catalog::{ADVERTISEMENTS, IDEAS, STUDENTS};

use crate::state::ServerState;

#[utoipa::path(get, path = "/advertisements", tag = "catalog", responses((status = 200, description = "Seed and live advertisements keyed by id")))]
pub async fn advertisements(State(state): State<ServerState>) -> Json<Map<String, Value>> {
    Json(state.catalog.merged(ADVERTISEMENTS).await)
}

#[utoipa::path(get, path = "/ideas", tag = "catalog", responses((status = 200, description = "Seed and live ideas keyed by id")))]
pub async fn ideas(State(state): State<ServerState>) -> Json<Map<String, Value>> {
    Json(state.catalog.merged(IDEAS).await)
}

#[utoipa::path(get, path = "/students", tag = "catalog", responses((status = 200, description = "Seed and live students keyed by id")))]
pub async fn students(State(state): State<ServerState>) -> Json<Map<String, Value>> {
    Json(state.catalog.merged(STUDENTS).await)
}
