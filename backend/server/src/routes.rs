use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use contact::{ContactRequest, ContactResponse};
use tracing::info;

use crate::{error::AppError, state::AppState};

pub const ROOT_MESSAGE: &str = "DevNxt Studio API is running...";

pub async fn root_handler() -> &'static str {
    ROOT_MESSAGE
}

/// Every path out of here returns exactly one response value, success or [`AppError`].
pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;

    let contact = request.validate()?;
    let submission = state.store.save(contact).await?;

    info!(id = %submission.id, "Contact saved");

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse::created(submission.id)),
    ))
}
