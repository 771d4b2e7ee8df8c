//! Common test utilities for settlement service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum_test::TestServer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use acme_settlement_client::AcmeConfig;
use acme_settlement_core::MerchantId;
use acme_settlement_service::{create_router, AppState, ServiceConfig};

/// Test harness: the service under test wired to a mock upstream API.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The mock ACME API the service talks to.
    pub upstream: MockServer,
}

impl TestHarness {
    /// Create a harness with the default attempt budget (3).
    pub async fn new() -> Self {
        Self::with_max_attempts(3).await
    }

    /// Create a harness with a custom attempt budget.
    ///
    /// Tests that drive the upstream to exhaustion use a budget of 1 or 2
    /// to keep backoff sleeps short.
    pub async fn with_max_attempts(max_attempts: u32) -> Self {
        let upstream = MockServer::start().await;

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            acme: AcmeConfig {
                base_url: upstream.uri(),
                timeout_seconds: 2,
                max_attempts,
            },
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(config);
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        Self { server, upstream }
    }

    /// Mount a merchant lookup responding with the given name.
    pub async fn mount_merchant(&self, id: MerchantId, name: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/merchants/{id}/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(merchant_body(id, name)))
            .mount(&self.upstream)
            .await;
    }

    /// Mount a single transaction page (no further pages).
    pub async fn mount_transactions(&self, results: Vec<serde_json::Value>) {
        Mock::given(method("GET"))
            .and(path("/transactions/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(results, None)))
            .mount(&self.upstream)
            .await;
    }
}

/// Upstream merchant body.
pub fn merchant_body(id: MerchantId, name: &str) -> serde_json::Value {
    serde_json::json!({"id": id.to_string(), "name": name})
}

/// Upstream paginated listing body.
pub fn page_body(results: Vec<serde_json::Value>, next: Option<&str>) -> serde_json::Value {
    serde_json::json!({"results": results, "next": next})
}

/// Upstream transaction body.
pub fn transaction(kind: &str, amount: &str) -> serde_json::Value {
    serde_json::json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "type": kind,
        "amount": amount,
    })
}
