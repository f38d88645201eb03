use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use models::contact::ContactFormData;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const SUBMIT_OK_MESSAGE: &str = "Thank you for your message! We'll get back to you soon.";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to save your message. Please try again later.";
pub const UPDATE_OK_MESSAGE: &str = "Message status updated successfully";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update message status";

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    pub message_id: String,
}

#[derive(Serialize, Debug)]
pub struct UpdateResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Admin listing of all contact messages.
#[utoipa::path(get, path = "/api/contact", tag = "contact", responses((status = 200, description = "Contact messages keyed by id")))]
pub async fn list_messages(State(state): State<ServerState>) -> Json<Map<String, Value>> {
    Json(state.contacts.list().await)
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = crate::openapi::ContactFormDoc,
    responses(
        (status = 200, description = "Stored"),
        (status = 400, description = "Blank name, subject or message"),
        (status = 422, description = "Malformed body or email"),
        (status = 500, description = "Remote store unavailable; message kept in a local backup")
    )
)]
pub async fn submit(
    State(state): State<ServerState>,
    payload: Result<Json<ContactFormData>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(form) = payload?;
    let message = state
        .contacts
        .submit(form)
        .await
        .map_err(|e| ApiError::from_service(e, SUBMIT_FAILED_MESSAGE))?;
    Ok(Json(SubmitResponse { success: true, message: SUBMIT_OK_MESSAGE, message_id: message.id }))
}

#[utoipa::path(
    patch,
    path = "/api/contact/{message_id}",
    tag = "contact",
    params(("message_id" = String, Path, description = "Contact message id")),
    request_body = crate::openapi::StatusUpdateDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid payload, status or message id"),
        (status = 500, description = "Remote store unavailable")
    )
)]
pub async fn update_status(
    State(state): State<ServerState>,
    Path(message_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let Json(payload) = payload?;
    state
        .contacts
        .update_status(&message_id, &payload)
        .await
        .map_err(|e| ApiError::from_service(e, UPDATE_FAILED_MESSAGE))?;
    Ok(Json(UpdateResponse { success: true, message: UPDATE_OK_MESSAGE }))
}
