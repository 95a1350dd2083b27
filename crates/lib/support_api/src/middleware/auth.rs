//! Authentication middleware: Bearer token extraction and JWT verification.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::AppState;
use crate::error::AppError;
use crate::services::auth::{TokenClaims, verify_access_token};

/// Message for every token failure; the cause is only logged.
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Key used to store `TokenClaims` in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies the JWT,
/// and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        debug!("missing authorization header");
        return Err(AppError::Unauthorized(INVALID_TOKEN.into()));
    };

    let Some(token) = header.strip_prefix("Bearer ") else {
        debug!("unsupported authorization scheme");
        return Err(AppError::Unauthorized(INVALID_TOKEN.into()));
    };

    let claims = verify_access_token(token.trim(), state.config.jwt_secret.as_bytes())
        .ok_or_else(|| AppError::Unauthorized(INVALID_TOKEN.into()))?;

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}
