//! Session-token authentication module.
//!
//! Write routes resolve the caller's session token to a user before the
//! handler body runs; requests without a valid session are rejected.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::errors::AppError;
use crate::models::User;
use crate::AppState;

/// Header name for the session token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Extractor for the authenticated user behind the request's session token.
///
/// Accepts the token in the `x-session-token` header or as a bearer token
/// in `Authorization`. Missing or unknown tokens reject with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_headers(parts) else {
            return Err(AppError::Unauthorized(
                "Missing session token".to_string(),
            ));
        };

        match state.repo.get_session_user(&token).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(AppError::Unauthorized(
                "Invalid session token".to_string(),
            )),
        }
    }
}

/// Pull the session token out of the request headers.
fn token_from_headers(parts: &Parts) -> Option<String> {
    let direct = parts
        .headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    if direct.is_some() {
        return direct;
    }

    // Also check Authorization header as bearer token
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}
