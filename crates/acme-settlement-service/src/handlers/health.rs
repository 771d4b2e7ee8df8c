//! Health check and service descriptor handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Upstream ACME API connectivity.
    pub acme_api: String,
    /// Probe failure detail, present only when unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint.
///
/// Probes the upstream merchant listing; the service is only as healthy as
/// its ability to reach the ACME API.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.client.merchants(1).await {
        Ok(_) => Json(HealthResponse {
            status: "healthy".to_string(),
            acme_api: "connected".to_string(),
            error: None,
        })
        .into_response(),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                acme_api: "disconnected".to_string(),
                error: Some(err.to_string()),
            }),
        )
            .into_response(),
    }
}

/// Service descriptor endpoint.
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "ACME Settlement Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Settlement calculation service for ACME Payments",
        "endpoints": {
            "settlement": "/settlement",
            "health": "/health",
            "merchants": "/merchants",
        },
    }))
}
