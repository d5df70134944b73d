//! Login, auth guard, and service endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{favorite_body, TestConfig, TestFixture};

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_hides_secret() {
    let fixture = TestFixture::with_config(TestConfig::with_session_auth()).await;

    let response = fixture.get("/api/v1/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["auth"]["method"], "session");
    assert!(!response.body.to_string().contains(common::TEST_SECRET));
}

#[tokio::test]
async fn test_metrics_exposition() {
    let fixture = TestFixture::new().await;
    fixture.get("/api/v1/health").await;

    let response = fixture.get("/api/v1/metrics").await;

    assert_status!(response, StatusCode::OK);
    let text = response.body.as_str().unwrap();
    assert!(text.contains("marquee_http_requests_total"));
}

#[tokio::test]
async fn test_login_unsupported_without_sessions() {
    let fixture = TestFixture::new().await;

    let response = fixture.post("/api/v1/login", json!({ "username": "alice" })).await;

    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_defaults_to_guest() {
    let mut fixture = TestFixture::with_config(TestConfig::with_session_auth()).await;

    let response = fixture.post("/api/v1/login", json!({})).await;
    assert_status!(response, StatusCode::OK);
    let token = response.body["token"].as_str().unwrap().to_string();
    assert!(response.body["expires_at"].is_string());

    fixture.set_token(Some(&token));
    let response = fixture
        .post("/api/v1/favorites", favorite_body(603, "The Matrix"))
        .await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["added_by"], "guest");
}

#[tokio::test]
async fn test_login_with_empty_body() {
    let fixture = TestFixture::with_config(TestConfig::with_session_auth()).await;

    let response = fixture.post_raw("/api/v1/login", "").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.body["token"].is_string());
}

#[tokio::test]
async fn test_favorites_require_token() {
    let mut fixture = TestFixture::with_config(TestConfig::with_session_auth()).await;

    let response = fixture.get("/api/v1/favorites").await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Token required");

    fixture.set_token(Some("forged.token"));
    let response = fixture.get("/api/v1/favorites").await;
    assert_status!(response, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "Invalid token");

    fixture.login_as("alice").await;
    let response = fixture.get("/api/v1/favorites").await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_catalog_routes_are_public() {
    let fixture = TestFixture::with_config(TestConfig::with_session_auth()).await;

    let response = fixture.get("/api/v1/movies/popular").await;

    assert_status!(response, StatusCode::OK);
}
