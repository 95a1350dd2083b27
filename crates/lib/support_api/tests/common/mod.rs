//! Shared router harness: in-memory store + deterministic enricher.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use support_api::{AppState, config::ApiConfig};
use support_core::enrichment::Enricher;
use support_core::testing::{KeywordEnricher, MemoryStore};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_enricher(Arc::new(KeywordEnricher::new()))
    }

    pub fn with_enricher(enricher: Arc<dyn Enricher>) -> Self {
        Self::build(enricher, None)
    }

    pub fn with_public_dir(dir: PathBuf) -> Self {
        Self::build(Arc::new(KeywordEnricher::new()), Some(dir))
    }

    fn build(enricher: Arc<dyn Enricher>, public_dir: Option<PathBuf>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState {
            store: store.clone(),
            enricher,
            config: ApiConfig {
                bind_addr: "127.0.0.1:0".into(),
                jwt_secret: JWT_SECRET.into(),
                public_dir,
            },
        };
        Self {
            router: support_api::router(state),
            store,
        }
    }

    /// Send a request and return the status plus the parsed JSON body (Null when empty).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.send_raw(method, uri, token, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse JSON")
        };
        (status, json)
    }

    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let resp = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request");
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, bytes.to_vec())
    }

    /// Register an agent and return its bearer token.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let (status, json) = self
            .send(
                "POST",
                "/api/register",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                    "name": "Test Agent"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {json}");
        json["token"].as_str().expect("token").to_string()
    }
}
