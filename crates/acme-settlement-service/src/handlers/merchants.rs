//! Merchant listing handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use acme_settlement_core::MerchantId;

use crate::error::ApiError;
use crate::state::AppState;

/// Merchant listing response.
#[derive(Debug, Serialize)]
pub struct MerchantsResponse {
    /// Merchants from the first upstream page.
    pub merchants: Vec<MerchantEntry>,
}

/// One merchant in the listing.
#[derive(Debug, Serialize)]
pub struct MerchantEntry {
    /// Merchant identifier.
    pub id: MerchantId,
    /// Display name.
    pub name: String,
}

/// List merchants (first upstream page only).
pub async fn list_merchants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MerchantsResponse>, ApiError> {
    let fetched = state.client.merchants(1).await.map_err(|err| {
        tracing::error!(error = %err, "failed to fetch merchant listing");
        ApiError::ExternalService("Failed to fetch merchants".to_string())
    })?;

    let merchants = fetched
        .body
        .results
        .into_iter()
        .map(|merchant| MerchantEntry {
            id: merchant.id,
            name: merchant.name,
        })
        .collect();

    Ok(Json(MerchantsResponse { merchants }))
}
