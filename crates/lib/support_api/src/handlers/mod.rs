//! Request handlers.

pub mod auth;
pub mod health;
pub mod messages;

use crate::error::AppError;

/// Unmatched `/api/*` paths get the JSON error envelope instead of the SPA.
pub async fn api_not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}
