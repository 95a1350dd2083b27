//! # support_api
//!
//! HTTP API library for the support intake service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get, post};
use sqlx::PgPool;
use support_core::enrichment::Enricher;
use support_core::store::SupportStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, messages};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persistence for users, customers, messages and analyses.
    pub store: Arc<dyn SupportStore>,
    /// Process-wide AI client, built once at startup.
    pub enricher: Arc<dyn Enricher>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `support_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    support_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_API_REGISTER, post(auth::register_handler))
        .route(routes::POST_API_LOGIN, post(auth::login_handler))
        .route(routes::API_FALLBACK, any(handlers::api_not_found));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(
            routes::API_MESSAGES,
            post(messages::create_message_handler).get(messages::list_messages_handler),
        )
        .route(
            routes::GET_API_MESSAGES_SENTIMENT_TRENDS,
            get(messages::sentiment_trends_handler),
        )
        .route(routes::GET_API_MESSAGES_ID, get(messages::get_message_handler))
        .route(
            routes::GET_API_MESSAGES_ID_SUMMARY,
            get(messages::summary_handler),
        )
        .route(
            routes::POST_API_MESSAGES_ID_SUGGEST_REPLY,
            post(messages::suggest_reply_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let mut app = Router::new().merge(public).merge(protected);

    // Frontend bundle: real files first, everything else falls back to index.html.
    if let Some(dir) = &state.config.public_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
