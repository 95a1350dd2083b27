//! Registration, login and bearer-token gating through the router.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn register_then_login_issues_usable_token() {
    let app = TestApp::new();

    let (status, json) = app
        .send(
            "POST",
            "/api/register",
            None,
            Some(json!({"email": "agent@example.com", "password": "secret1", "name": "Agent"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["email"], "agent@example.com");
    assert_eq!(json["user"]["name"], "Agent");
    assert_eq!(json["user"]["role"], "agent");
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"].get("password").is_none());

    let (status, json) = app
        .send(
            "POST",
            "/api/login",
            None,
            Some(json!({"email": "agent@example.com", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["token"].as_str().expect("token");

    let (status, json) = app.send("GET", "/api/messages", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::new();
    app.register("dup@example.com", "secret1").await;

    let (status, json) = app
        .send(
            "POST",
            "/api/register",
            None,
            Some(json!({"email": "dup@example.com", "password": "secret2", "name": "Other"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Email already exists");
}

#[tokio::test]
async fn invalid_registration_body_is_400() {
    let app = TestApp::new();

    let (status, json) = app
        .send("POST", "/api/register", None, Some(json!({"email": "x@y.z"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");

    let (status, _) = app
        .send(
            "POST",
            "/api/register",
            None,
            Some(json!({"email": "x@y.z", "password": "123", "name": "Short"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_identical() {
    let app = TestApp::new();
    app.register("known@example.com", "secret1").await;

    let (wrong_status, wrong_body) = app
        .send(
            "POST",
            "/api/login",
            None,
            Some(json!({"email": "known@example.com", "password": "nope123"})),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .send(
            "POST",
            "/api/login",
            None,
            Some(json!({"email": "ghost@example.com", "password": "secret1"})),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "unauthorized");
    assert_eq!(wrong_body["message"], "Invalid credentials");
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let app = TestApp::new();

    for token in [None, Some("garbage"), Some("eyJhbGciOiJIUzI1NiJ9.e30.bad")] {
        let (status, json) = app.send("GET", "/api/messages", token, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "token: {token:?}");
        assert_eq!(json["error"], "unauthorized");
        assert_eq!(json["message"], "Invalid or expired token");
    }
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let app = TestApp::new();
    let foreign =
        support_core::auth::jwt::generate_access_token("someone", "x@y.z", b"another-secret")
            .expect("token");
    let (status, _) = app.send("GET", "/api/messages", Some(&foreign), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, json) = app.send("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_connected"], true);
}
