use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use tracing::debug;

use crate::error::SpacedockError;
use crate::router::SpacedockState;
use crate::service::basic_auth::decode_basic_auth;

/// Gate for mutating routes: decodes `Authorization: Basic ...` and checks the
/// pair against the `users` table.
///
/// A missing header is a validation error (400); anything wrong with the
/// header content or the credentials is an authentication error (401).
#[derive(Debug, Clone)]
pub struct RequireBasicAuth {
    pub email: String,
}

impl FromRequestParts<SpacedockState> for RequireBasicAuth {
    type Rejection = SpacedockError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SpacedockState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(AUTHORIZATION).ok_or_else(|| {
            SpacedockError::Validation("missing Authorization header".to_string())
        })?;
        let header = header.to_str().map_err(|_| {
            SpacedockError::Authentication("Authorization header is not valid text".to_string())
        })?;

        let creds = decode_basic_auth(header).inspect_err(|e| {
            debug!(error = %e, "rejected Authorization header");
        })?;
        state
            .storage
            .verify_credentials(&creds)
            .await
            .inspect_err(|e| debug!(email = %creds.email, error = %e, "credential check failed"))?;

        Ok(Self { email: creds.email })
    }
}
