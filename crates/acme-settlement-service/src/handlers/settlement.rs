//! Settlement report handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use acme_settlement_core::{MerchantId, SettlementReport};

use crate::error::ApiError;
use crate::state::AppState;

/// Settlement query parameters.
///
/// All fields are optional at the extractor level so missing parameters
/// produce specific messages instead of a generic deserialization error.
#[derive(Debug, Deserialize)]
pub struct SettlementQuery {
    /// UUID of the merchant (required).
    pub merchant_id: Option<String>,
    /// Settlement date in YYYY-MM-DD format (required).
    pub date: Option<String>,
    /// IANA timezone for the calculation (default: UTC).
    pub timezone: Option<String>,
}

/// Get settlement data for a merchant on a specific date.
pub async fn get_settlement(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SettlementQuery>,
) -> Result<Json<SettlementReport>, ApiError> {
    let merchant_id = query
        .merchant_id
        .ok_or_else(|| ApiError::BadRequest("merchant_id parameter is required".to_string()))?;
    let merchant_id: MerchantId = merchant_id
        .parse()
        .map_err(|_| ApiError::BadRequest("merchant_id must be a UUID".to_string()))?;

    let date = query
        .date
        .ok_or_else(|| {
            ApiError::BadRequest("date parameter is required (YYYY-MM-DD format)".to_string())
        })?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Invalid date format. Use YYYY-MM-DD".to_string()))?;

    if date > Local::now().date_naive() {
        return Err(ApiError::BadRequest(
            "Settlement date cannot be in the future".to_string(),
        ));
    }

    let timezone = query.timezone.unwrap_or_else(|| "UTC".to_string());

    let report = state
        .settlement
        .calculate(merchant_id, date, &timezone)
        .await?;

    Ok(Json(report))
}
