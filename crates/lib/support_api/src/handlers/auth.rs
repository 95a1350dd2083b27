//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{LoginRequest, RegisterRequest, TokenResponse};
use crate::services::auth;

/// `POST /api/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Json(body) = body?;
    let resp = auth::login(
        state.store.as_ref(),
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}

/// `POST /api/register` — create a new agent account.
pub async fn register_handler(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Json(body) = body?;
    let resp = auth::register(
        state.store.as_ref(),
        &body.email,
        &body.password,
        &body.name,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}
