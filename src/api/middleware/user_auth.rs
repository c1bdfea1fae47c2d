//! Bearer-token authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::Identity;

/// Extractor that requires a valid `Authorization: Bearer <jwt>` header
///
/// Runs on the request head only, so handlers that take it before their body
/// extractor reject unauthenticated calls without reading the body.
#[derive(Debug, Clone)]
pub struct RequireUser(pub Identity);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_token(&parts.headers)?;

        let identity = state
            .token_verifier
            .verify(&token)
            .map_err(ApiError::from)?;

        debug!(user_id = %identity.user_id(), "Request authenticated");

        Ok(RequireUser(identity))
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    token.map(str::to_string).ok_or_else(|| {
        ApiError::unauthorized(
            "Authentication required. Provide a token via 'Authorization: Bearer <token>'",
        )
    })
}
