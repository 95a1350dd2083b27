//! Health endpoint: bootstrap check.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /api/health` — reports the crate version and store connectivity.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_connected = state.store.ping().await;
    Json(HealthResponse {
        status: if db_connected { "ok" } else { "degraded" }.to_string(),
        version: support_core::version().to_string(),
        db_connected,
    })
}
