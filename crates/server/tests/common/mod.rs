//! Common test utilities for in-process HTTP testing with mocks.
//!
//! This module provides a test fixture that builds the router with a mock
//! remote catalog and a temporary favorites database, so every route can be
//! exercised without network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use marquee_core::{
    config::ServerConfig, testing::MockExternalCatalog, AuthConfig, AuthMethod, Authenticator,
    Config, DatabaseConfig, ExternalCatalog, NoneAuthenticator, SessionAuthenticator,
    SqliteFavoritesStore,
};
use marquee_server::state::AppState;

/// Re-export fixtures for test convenience
pub use marquee_core::testing::fixtures;

pub const TEST_SECRET: &str = "test-secret";

/// Test fixture with a mock catalog and a temporary database.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_add_favorite() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/v1/favorites", favorite_body(603, "The Matrix")).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock remote catalog - configure movies and listing pages
    pub catalog: Arc<MockExternalCatalog>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
    /// Bearer token sent with every request, if any
    token: Option<String>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Configuration for test fixture.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Use session auth instead of the guest-only authenticator
    pub session_auth: bool,
    /// Leave the remote catalog unconfigured
    pub without_catalog: bool,
}

impl TestConfig {
    pub fn with_session_auth() -> Self {
        Self {
            session_auth: true,
            ..Default::default()
        }
    }

    pub fn without_catalog() -> Self {
        Self {
            without_catalog: true,
            ..Default::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let catalog = Arc::new(MockExternalCatalog::new());

        let (method, authenticator): (AuthMethod, Arc<dyn Authenticator>) =
            if test_config.session_auth {
                (
                    AuthMethod::Session,
                    Arc::new(
                        SessionAuthenticator::new(TEST_SECRET, 24)
                            .expect("Failed to create authenticator"),
                    ),
                )
            } else {
                (AuthMethod::None, Arc::new(NoneAuthenticator::new()))
            };

        let config = Config {
            auth: AuthConfig {
                method,
                secret: test_config
                    .session_auth
                    .then(|| TEST_SECRET.to_string()),
                session_ttl_hours: 24,
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            tmdb: None,
        };

        let favorites = Arc::new(
            SqliteFavoritesStore::new(&db_path).expect("Failed to create favorites store"),
        );

        let external: Option<Arc<dyn ExternalCatalog>> = if test_config.without_catalog {
            None
        } else {
            Some(Arc::clone(&catalog) as Arc<dyn ExternalCatalog>)
        };

        let state = Arc::new(AppState::new(config, authenticator, favorites, external));
        let router = marquee_server::api::create_router(state);

        Self {
            router,
            catalog,
            temp_dir,
            token: None,
        }
    }

    /// Log in and send the issued token with subsequent requests.
    pub async fn login_as(&mut self, username: &str) -> TestResponse {
        let response = self
            .post("/api/v1/login", json!({ "username": username }))
            .await;
        if let Some(token) = response.body["token"].as_str() {
            self.token = Some(token.to_string());
        }
        response
    }

    /// Send a fixed bearer token with subsequent requests.
    pub fn set_token(&mut self, token: Option<&str>) {
        self.token = token.map(str::to_string);
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = self
            .builder("POST", path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    fn builder(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = self.builder(method, path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into()))
        };

        TestResponse { status, body }
    }
}

/// A complete favorite request body for a catalog entry.
pub fn favorite_body(id: u32, title: &str) -> Value {
    serde_json::to_value(fixtures::movie(id, title)).expect("Failed to encode movie")
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
