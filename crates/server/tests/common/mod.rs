//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the router with a mock
//! title resolver injected, so curation requests never touch the network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use autostream_core::{testing::MockTitleResolver, Config, ServerConfig};

/// Re-export fixtures for test convenience
#[allow(unused_imports)]
pub use autostream_core::testing::fixtures;

/// Test fixture for API testing with a mock title resolver.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_curation() {
///     let fixture = TestFixture::new().await;
///     fixture.resolver.add_title("tt0111161", "The Shawshank Redemption").await;
///
///     let response = fixture.post("/api/v1/streams/curate", json!({
///         "type": "movie",
///         "id": "tt0111161",
///         "streams": []
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock title resolver - configure titles, errors and delays
    pub resolver: Arc<MockTitleResolver>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default configuration.
    pub async fn new() -> Self {
        Self::with_config(Self::default_config()).await
    }

    /// Default configuration with a short lookup timeout.
    pub fn default_config() -> Config {
        let mut config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 7000, // Not used for in-process testing
            },
            ..Default::default()
        };
        config.cinemeta.timeout_secs = 1;
        config
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(config: Config) -> Self {
        let resolver = Arc::new(MockTitleResolver::new());

        let state = Arc::new(autostream_server::state::AppState::new(
            config,
            Arc::clone(&resolver) as Arc<dyn autostream_core::TitleResolver>,
        ));

        let router = autostream_server::api::create_router(state);

        Self { router, resolver }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    #[allow(dead_code)]
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
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

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}
