//! Settlement calculation pipeline.
//!
//! The pipeline is linear: validate the merchant, derive the settlement
//! window, sweep the paginated transaction listing, reduce the amounts,
//! assemble the report. Only merchant validation can fail the whole
//! operation; every other upstream failure degrades to partial results
//! plus diagnostics.

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;

use acme_settlement_client::{AcmeClient, ListFilter, Page, RequestExhausted};
use acme_settlement_core::{
    resolve_timezone, ApiErrors, ErrorDetail, MerchantId, SettlementPeriod, SettlementReport,
    SettlementSummary, Transaction,
};

/// Errors that abort a settlement calculation.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    /// The merchant lookup exhausted its retries; without a validated
    /// merchant there is nothing to settle.
    #[error("merchant {merchant_id} not found or upstream error")]
    MerchantNotFound {
        /// The merchant that could not be validated.
        merchant_id: MerchantId,
        /// The exhausted lookup, with its attempt history.
        source: RequestExhausted,
    },
}

/// Everything a transaction sweep produced: best-effort records plus
/// the diagnostics collected along the way.
struct PageSweep {
    transactions: Vec<Transaction>,
    errors: Vec<ErrorDetail>,
}

/// Service for calculating merchant settlements.
#[derive(Clone)]
pub struct SettlementService {
    client: Arc<AcmeClient>,
}

impl SettlementService {
    /// Create a new settlement service over a shared upstream client.
    #[must_use]
    pub fn new(client: Arc<AcmeClient>) -> Self {
        Self { client }
    }

    /// Calculate the settlement report for a merchant on a date.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::MerchantNotFound`] when the merchant
    /// lookup exhausts its retries. No transaction fetch is attempted in
    /// that case.
    pub async fn calculate(
        &self,
        merchant_id: MerchantId,
        date: NaiveDate,
        timezone: &str,
    ) -> Result<SettlementReport, SettlementError> {
        let mut errors: Vec<ErrorDetail> = Vec::new();

        // Validate the merchant exists. This is the one fatal failure mode.
        let merchant = match self.client.merchant(merchant_id).await {
            Ok(fetched) => {
                errors.extend(fetched.failures.into_iter().map(ErrorDetail::Attempt));
                fetched.body
            }
            Err(source) => {
                tracing::error!(
                    merchant_id = %merchant_id,
                    attempts = source.failures.len(),
                    "merchant lookup exhausted retries"
                );
                return Err(SettlementError::MerchantNotFound {
                    merchant_id,
                    source,
                });
            }
        };

        let tz = resolve_or_utc(timezone);
        let period = SettlementPeriod::for_date(date, tz);

        let sweep = self.fetch_all_transactions(merchant_id, &period).await;
        errors.extend(sweep.errors);

        let summary = SettlementSummary::of(&sweep.transactions);

        Ok(SettlementReport {
            merchant_id,
            merchant_name: merchant.name,
            settlement_date: date,
            settlement_period: period,
            settlement_amount: summary.net_settlement,
            summary,
            transactions: sweep.transactions,
            api_errors: ApiErrors::from_details(errors),
        })
    }

    /// Sweep every transaction page in the window, best effort.
    ///
    /// Stops at the first exhausted page fetch and keeps everything
    /// accumulated up to that point.
    async fn fetch_all_transactions(
        &self,
        merchant_id: MerchantId,
        period: &SettlementPeriod,
    ) -> PageSweep {
        let filter = ListFilter {
            merchant: Some(merchant_id),
            created_after: Some(period.start),
            created_before: Some(period.end),
        };

        let mut transactions = Vec::new();
        let mut errors = Vec::new();
        let mut page = 1;

        loop {
            match self.client.transactions(&filter, page).await {
                Ok(fetched) => {
                    errors.extend(fetched.failures.into_iter().map(ErrorDetail::Attempt));

                    let Page { results, next } = fetched.body;
                    transactions.extend(results);

                    if next.is_none() {
                        break;
                    }
                    page += 1;
                }
                Err(exhausted) => {
                    // Partial results beat total failure; stop the sweep here.
                    tracing::error!(
                        merchant_id = %merchant_id,
                        page,
                        "transaction page fetch exhausted retries"
                    );
                    errors.push(ErrorDetail::page_failure(page, exhausted.failures));
                    break;
                }
            }
        }

        PageSweep {
            transactions,
            errors,
        }
    }
}

/// Resolve a timezone name, falling back to UTC on anything unrecognized.
fn resolve_or_utc(timezone: &str) -> Tz {
    match resolve_timezone(timezone) {
        Ok(tz) => tz,
        Err(err) => {
            tracing::warn!(timezone, error = %err, "invalid timezone, falling back to UTC");
            Tz::UTC
        }
    }
}
