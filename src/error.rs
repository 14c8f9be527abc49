use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::service::basic_auth::BasicAuthError;

/// Message returned when a partial update carries no field besides the id.
pub const NOT_ENOUGH_PARAMS: &str = "Not enough parameters provided to fulfill the request.";

#[derive(Debug, ThisError)]
pub enum SpacedockError {
    /// Missing or malformed request input.
    #[error("{0}")]
    Validation(String),

    /// Credential mismatch or a Basic-Auth header that cannot be decoded.
    #[error("{0}")]
    Authentication(String),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),
}

impl SpacedockError {
    pub fn status(&self) -> StatusCode {
        match self {
            SpacedockError::Validation(_) | SpacedockError::Database(_) => StatusCode::BAD_REQUEST,
            SpacedockError::Authentication(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<BasicAuthError> for SpacedockError {
    fn from(e: BasicAuthError) -> Self {
        SpacedockError::Authentication(e.to_string())
    }
}

impl From<JsonRejection> for SpacedockError {
    fn from(rejection: JsonRejection) -> Self {
        SpacedockError::Validation(rejection.body_text())
    }
}

// The full message goes back to the caller, database errors included.
impl IntoResponse for SpacedockError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self.to_string())).into_response()
    }
}
