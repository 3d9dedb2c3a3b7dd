use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contact::{
    ContactResponse, MALFORMED_PAYLOAD_MESSAGE, MISSING_FIELDS_MESSAGE, MissingField,
    SERVER_ERROR_MESSAGE,
};
use thiserror::Error;
use tracing::{debug, error};

use crate::database::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    MissingField(#[from] MissingField),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::MissingField(e) => {
                debug!("Rejected contact: {e}");
                MISSING_FIELDS_MESSAGE
            }
            AppError::MalformedPayload(reason) => {
                debug!("Rejected contact body: {reason}");
                MALFORMED_PAYLOAD_MESSAGE
            }
            AppError::Persistence(e) => {
                error!("Contact error: {e}");
                SERVER_ERROR_MESSAGE
            }
        };

        (self.status(), Json(ContactResponse::rejected(message))).into_response()
    }
}
