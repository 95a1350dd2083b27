//! Application error types.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use support_core::auth::AuthError;
use support_core::enrichment::EnrichmentError;
use support_core::intake::SupportError;
use support_core::store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// 5xx variants carry internal detail for the log only; the response body
/// gets a fixed message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Enrichment failed: {0}")]
    Enrichment(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Enrichment(detail) => {
                error!(detail = %detail, "enrichment failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "enrichment_failed",
                    "AI analysis failed",
                )
            }
            AppError::Persistence(detail) => {
                error!(detail = %detail, "persistence failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "persistence_error",
                    "Storage operation failed",
                )
            }
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", e.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Validation(format!("Invalid query string: {}", e.body_text()))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(what) => AppError::Validation(format!("{what} already exists")),
            StoreError::Db(e) => AppError::Persistence(e.to_string()),
        }
    }
}

impl From<EnrichmentError> for AppError {
    fn from(e: EnrichmentError) -> Self {
        AppError::Enrichment(e.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::TokenError(msg) => AppError::Internal(msg),
            AuthError::Config(msg) => AppError::Internal(msg),
            AuthError::Store(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<SupportError> for AppError {
    fn from(e: SupportError) -> Self {
        match e {
            SupportError::Validation(msg) => AppError::Validation(msg),
            SupportError::NotFound(_) => AppError::NotFound("Message not found".into()),
            SupportError::Enrichment(e) => AppError::from(e),
            SupportError::Persistence(e) => AppError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("parse JSON")
    }

    #[tokio::test]
    async fn internal_detail_is_not_exposed() {
        let resp = AppError::Persistence("connection refused at 10.0.0.3".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "persistence_error");
        assert!(!json["message"].as_str().unwrap().contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let resp = AppError::from(SupportError::NotFound("x".into())).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "Message not found");
    }

    #[tokio::test]
    async fn auth_config_error_is_an_opaque_500() {
        let resp = AppError::from(AuthError::Config("JWT_SECRET is not set".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "internal_error");
        assert_eq!(json["message"], "Internal server error");
    }

    #[test]
    fn duplicate_record_is_a_validation_error() {
        let err = AppError::from(StoreError::Duplicate("email 'a@b.c'".into()));
        assert!(matches!(err, AppError::Validation(_)));
    }
}
