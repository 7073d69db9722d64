//! Router-level tests for the operation endpoint.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_service_lib::build;
use auth_service_lib::config::AuthServiceConfig;
use auth_service_lib::store::InMemoryCredentialStore;
use common::SigningSecret;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

const SECRET: &str = "test-secret-key-for-testing-only-32chars";

fn app() -> Router {
    let store = Arc::new(InMemoryCredentialStore::new());
    let config = AuthServiceConfig::new(SigningSecret::new(SECRET).unwrap());
    create_router(AppState::new(build(&config, store), "gateway"))
}

async fn call(app: &Router, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method("POST")
        .uri("/api")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = request.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn create(app: &Router, username: &str, role: &str, tenant: &str) {
    let (status, _) = call(
        app,
        json!({
            "operation": "CreateCredential",
            "arguments": {"username": username, "password": "pw1", "role": role, "tenant": tenant}
        }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn login(app: &Router, username: &str) -> String {
    let (status, body) = call(
        app,
        json!({"operation": "Login", "arguments": {"username": username, "password": "pw1"}}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "gateway");
}

#[tokio::test]
async fn test_create_login_me() {
    let app = app();
    create(&app, "alice", "Admin", "HotelA").await;
    let token = login(&app, "alice").await;

    let (status, body) = call(&app, json!({"operation": "Me"}), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "Admin");
    assert_eq!(body["data"]["tenant"], "HotelA");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = app();
    create(&app, "alice", "Admin", "HotelA").await;

    let (status, body) = call(
        &app,
        json!({"operation": "Login", "arguments": {"username": "alice", "password": "nope"}}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn test_gated_operation_without_token() {
    let app = app();
    create(&app, "alice", "Admin", "HotelA").await;

    let (status, body) = call(
        &app,
        json!({"operation": "ListCredentials", "arguments": {"tenant": "HotelA"}}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn test_garbage_token_is_anonymous() {
    let app = app();
    let (status, body) = call(&app, json!({"operation": "Me"}), Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn test_cross_tenant_denied() {
    let app = app();
    create(&app, "alice", "Admin", "HotelA").await;
    create(&app, "carol", "Admin", "HotelB").await;
    let token = login(&app, "alice").await;

    let (status, body) = call(
        &app,
        json!({"operation": "UpdateAdminCredential", "arguments": {"password": "pw2", "hotelName": "HotelB"}}),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "DENIED");

    // carol keeps her password
    login(&app, "carol").await;
}

#[tokio::test]
async fn test_duplicate_username_conflict() {
    let app = app();
    create(&app, "alice", "Admin", "HotelA").await;

    let (status, body) = call(
        &app,
        json!({
            "operation": "CreateCredential",
            "arguments": {"username": "alice", "password": "pw1", "role": "Staff", "tenant": "HotelB"}
        }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let app = app();

    let (status, body) = call(&app, json!({"operation": "DropTables"}), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = call(
        &app,
        json!({
            "operation": "CreateCredential",
            "arguments": {"username": "", "password": "pw1", "role": "Staff", "tenant": "HotelA"}
        }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_with_empty_password_reaches_verifier() {
    let app = app();
    create(&app, "alice", "Admin", "HotelA").await;

    let (status, body) = call(
        &app,
        json!({"operation": "Login", "arguments": {"username": "nonexistent", "password": ""}}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, body) = call(
        &app,
        json!({"operation": "Login", "arguments": {"username": "alice", "password": ""}}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn test_verify_admin_password_is_public() {
    let app = app();
    create(&app, "alice", "Admin", "HotelA").await;

    let (status, body) = call(
        &app,
        json!({"operation": "VerifyAdminPassword", "arguments": {"hotelName": "HotelA", "passwordInput": "pw1"}}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = app();
    create(&app, "alice", "Admin", "HotelA").await;
    let token = login(&app, "alice").await;

    let (status, body) = call(&app, json!({"operation": "Logout"}), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["revoked"], true);

    let (status, body) = call(&app, json!({"operation": "Me"}), Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "NOT_AUTHENTICATED");
}
