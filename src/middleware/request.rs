use axum::extract::FromRequest;

use crate::error::SpacedockError;

/// `axum::Json` whose rejection is reported as a validation error (400).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(SpacedockError))]
pub struct ApiJson<T>(pub T);
