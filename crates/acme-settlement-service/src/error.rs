//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use acme_settlement_core::MerchantId;

use crate::settlement::SettlementError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request - missing or malformed input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The merchant lookup exhausted its retries.
    #[error("merchant {0} not found or upstream error")]
    MerchantNotFound(MerchantId),

    /// The upstream API could not be reached at all.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            // Lookup exhaustion cannot distinguish "missing" from "upstream
            // down", so it stays a caller-visible 400 rather than a 404.
            Self::MerchantNotFound(_) => (
                StatusCode::BAD_REQUEST,
                "merchant_not_found",
                self.to_string(),
            ),
            Self::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                msg.clone(),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<SettlementError> for ApiError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::MerchantNotFound { merchant_id, .. } => {
                Self::MerchantNotFound(merchant_id)
            }
        }
    }
}
