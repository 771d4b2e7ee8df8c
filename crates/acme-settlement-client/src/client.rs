//! ACME API client implementation.

use std::time::Duration;

use rand::Rng;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use acme_settlement_core::{FailureRecord, Merchant, MerchantId, Transaction};

use crate::error::RequestExhausted;
use crate::types::{Fetched, ListFilter, Page};

/// Client configuration, threaded in at construction.
#[derive(Debug, Clone)]
pub struct AcmeConfig {
    /// Base URL of the ACME API.
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30).
    pub timeout_seconds: u64,

    /// Attempt budget per logical call (default: 3).
    pub max_attempts: u32,
}

impl Default for AcmeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-engine-dev.clerq.io/tech_assessment".to_string(),
            timeout_seconds: 30,
            max_attempts: 3,
        }
    }
}

/// Client for the ACME Payments API.
///
/// Stateless per call; the underlying connection pool is shared and safe to
/// reuse across concurrent requests.
#[derive(Debug, Clone)]
pub struct AcmeClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
}

impl AcmeClient {
    /// Create a new client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn new(config: &AcmeConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Fetch one merchant by ID.
    ///
    /// # Errors
    ///
    /// Returns [`RequestExhausted`] once the attempt budget is spent.
    pub async fn merchant(&self, id: MerchantId) -> Result<Fetched<Merchant>, RequestExhausted> {
        self.get(&format!("/merchants/{id}/"), &[]).await
    }

    /// Fetch one page of the merchant listing.
    ///
    /// # Errors
    ///
    /// Returns [`RequestExhausted`] once the attempt budget is spent.
    pub async fn merchants(&self, page: u32) -> Result<Fetched<Page<Merchant>>, RequestExhausted> {
        self.get("/merchants/", &[("page", page.to_string())]).await
    }

    /// Fetch one page of transactions matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`RequestExhausted`] once the attempt budget is spent.
    pub async fn transactions(
        &self,
        filter: &ListFilter,
        page: u32,
    ) -> Result<Fetched<Page<Transaction>>, RequestExhausted> {
        self.get("/transactions/", &filter.query(page)).await
    }

    /// Fetch one page of orders matching the filter.
    ///
    /// Orders are not shaped by this service; pages carry raw JSON objects.
    ///
    /// # Errors
    ///
    /// Returns [`RequestExhausted`] once the attempt budget is spent.
    pub async fn orders(
        &self,
        filter: &ListFilter,
        page: u32,
    ) -> Result<Fetched<Page<serde_json::Value>>, RequestExhausted> {
        self.get("/orders/", &filter.query(page)).await
    }

    /// Issue one retried GET against the upstream.
    ///
    /// Every failed attempt is recorded before the retry decision; the
    /// backoff sleep runs between attempts, never after the last one.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Fetched<T>, RequestExhausted> {
        let url = format!("{}{path}", self.base_url);
        let mut failures: Vec<FailureRecord> = Vec::new();

        for attempt in 0..self.max_attempts {
            match self.http.get(&url).query(query).send().await {
                Ok(response) if response.status() == StatusCode::OK => {
                    match response.json::<T>().await {
                        Ok(body) => {
                            if !failures.is_empty() {
                                tracing::debug!(
                                    url = %url,
                                    attempts = attempt + 1,
                                    "request recovered after failed attempts"
                                );
                            }
                            return Ok(Fetched { body, failures });
                        }
                        Err(err) => {
                            tracing::warn!(
                                url = %url,
                                attempt = attempt + 1,
                                error = %err,
                                "failed to decode response body"
                            );
                            failures.push(FailureRecord::transport(attempt + 1, err.to_string()));
                        }
                    }
                }
                Ok(response) => {
                    let status = response.status().as_u16();
                    tracing::warn!(
                        url = %url,
                        attempt = attempt + 1,
                        status,
                        "upstream returned non-200 status"
                    );
                    failures.push(FailureRecord::http(attempt + 1, status));
                }
                Err(err) if err.is_timeout() => {
                    tracing::warn!(url = %url, attempt = attempt + 1, "request timed out");
                    failures.push(FailureRecord::timeout(attempt + 1));
                }
                Err(err) => {
                    tracing::warn!(
                        url = %url,
                        attempt = attempt + 1,
                        error = %err,
                        "request failed"
                    );
                    failures.push(FailureRecord::transport(attempt + 1, err.to_string()));
                }
            }

            if attempt + 1 < self.max_attempts {
                tokio::time::sleep(backoff_delay(attempt)).await;
            }
        }

        Err(RequestExhausted { url, failures })
    }
}

/// Exponential backoff with jitter: `2^attempt_index + uniform(0, 1)`
/// seconds.
fn backoff_delay(attempt_index: u32) -> Duration {
    let exponent = i32::try_from(attempt_index).unwrap_or(i32::MAX);
    let jitter: f64 = rand::thread_rng().gen_range(0.0..1.0);
    Duration::from_secs_f64(2_f64.powi(exponent) + jitter)
}
