//! Common test utilities and fixtures

#![allow(dead_code)]

use statuspulse::{config::AppConfig, core::OnlinePolicy, AppState};
use std::sync::Arc;

/// Test configuration builder
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn with_probe_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.probe.timeout_ms = timeout_ms;
        self
    }

    pub fn with_online_policy(mut self, policy: OnlinePolicy) -> Self {
        self.config.probe.online_policy = policy;
        self
    }

    pub fn with_redis_url(mut self, url: impl Into<String>) -> Self {
        self.config.redis_url = Some(url.into());
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an application state over in-memory storage.
pub async fn build_test_state(config: AppConfig) -> Arc<AppState> {
    Arc::new(
        AppState::new(&config)
            .await
            .expect("Failed to build test AppState"),
    )
}

/// Builds the full router over in-memory storage with default config.
pub async fn build_test_app() -> axum::Router {
    statuspulse::create_router(build_test_state(TestConfigBuilder::new().build()).await)
}

/// Mock HTTP server for probe targets
pub struct MockSite {
    pub server: wiremock::MockServer,
}

impl MockSite {
    pub async fn start() -> Self {
        Self {
            server: wiremock::MockServer::start().await,
        }
    }

    /// Respond to every GET with the given status.
    pub async fn respond_with_status(&self, status: u16) {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Respond with the given status after a fixed delay.
    pub async fn respond_with_delay(&self, status: u16, delay: std::time::Duration) {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(status).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }
}

/// Test utilities for HTTP requests
pub mod http {
    use axum::{body::Body, http::Request};
    use serde_json::Value;

    pub fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}

/// Test assertions and utilities
pub mod assertions {
    use axum::{body::to_bytes, response::Response};
    use serde_json::Value;

    pub async fn assert_json_response(response: Response, expected_status: u16) -> Value {
        assert_eq!(response.status().as_u16(), expected_status);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).expect("Response body should be valid JSON")
    }

    pub async fn assert_error_response(
        response: Response,
        expected_status: u16,
        error_type: &str,
    ) -> Value {
        let json = assert_json_response(response, expected_status).await;

        assert!(
            json.get("type").is_some(),
            "Error response should have 'type' field"
        );
        assert_eq!(json["type"].as_str().unwrap(), error_type, "Error type mismatch");
        assert_eq!(json["status"].as_u64().unwrap(), u64::from(expected_status));

        json
    }
}
