//! Favorites CRUD over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{favorite_body, TestConfig, TestFixture};

#[tokio::test]
async fn test_add_list_get_remove() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/api/v1/favorites", favorite_body(603, "The Matrix"))
        .await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["id"], 603);
    assert_eq!(response.body["added_by"], "guest");

    let response = fixture.get("/api/v1/favorites").await;
    assert_status!(response, StatusCode::OK);
    let list = response.body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "The Matrix");

    let response = fixture.get("/api/v1/favorites/603").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["original_title"], "The Matrix");

    let response = fixture.delete("/api/v1/favorites/603").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Favorite 603 removed");

    let response = fixture.get("/api/v1/favorites").await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_duplicate_is_conflict() {
    let fixture = TestFixture::new().await;

    fixture
        .post("/api/v1/favorites", favorite_body(27205, "Inception"))
        .await;
    let response = fixture
        .post("/api/v1/favorites", favorite_body(27205, "Inception"))
        .await;

    assert_status!(response, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "Movie already in favorites");
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let fixture = TestFixture::new().await;

    let mut body = favorite_body(603, "The Matrix");
    let object = body.as_object_mut().unwrap();
    object.remove("title");
    object.remove("popularity");

    let response = fixture.post("/api/v1/favorites", body).await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Missing fields: popularity, title");
    assert_eq!(fixture.get("/api/v1/favorites").await.body, json!([]));
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture.post_raw("/api/v1/favorites", "{not json").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_and_unknown_ids() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/favorites/abc").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid ID");

    let response = fixture.delete("/api/v1/favorites/abc").await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = fixture.get("/api/v1/favorites/42").await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Favorite not found");

    let response = fixture.delete("/api/v1/favorites/42").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorites_are_per_user() {
    let mut fixture = TestFixture::with_config(TestConfig::with_session_auth()).await;

    fixture.login_as("alice").await;
    let response = fixture
        .post("/api/v1/favorites", favorite_body(603, "The Matrix"))
        .await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["added_by"], "alice");

    fixture.login_as("bob").await;
    assert_eq!(fixture.get("/api/v1/favorites").await.body, json!([]));
    assert_status!(
        fixture.get("/api/v1/favorites/603").await,
        StatusCode::NOT_FOUND
    );

    // Same movie is independent per user
    let response = fixture
        .post("/api/v1/favorites", favorite_body(603, "The Matrix"))
        .await;
    assert_status!(response, StatusCode::CREATED);

    fixture.login_as("alice").await;
    let list = fixture.get("/api/v1/favorites").await.body;
    assert_eq!(list.as_array().unwrap().len(), 1);
}
