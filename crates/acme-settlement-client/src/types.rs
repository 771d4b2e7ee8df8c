//! Request and response shapes shared by the client operations.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

use acme_settlement_core::{FailureRecord, MerchantId};

/// One page of an upstream listing.
///
/// Every paginated ACME resource responds with `{results, next}`; a null or
/// missing `next` marks the final page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// The records on this page.
    #[serde(default)]
    pub results: Vec<T>,

    /// URL of the next page, absent on the last one.
    #[serde(default)]
    pub next: Option<String>,
}

/// A successfully fetched body plus the attempt-level failures that
/// preceded it.
///
/// The failure list is non-empty exactly when the call needed retries;
/// callers surface it as partial-failure diagnostics.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    /// The parsed response body.
    pub body: T,

    /// Failures from attempts before the eventual success, in order.
    pub failures: Vec<FailureRecord>,
}

/// Filter for the transaction and order listings.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Restrict to one merchant.
    pub merchant: Option<MerchantId>,

    /// Lower bound on `created_at` (inclusive).
    pub created_after: Option<DateTime<FixedOffset>>,

    /// Upper bound on `created_at` (inclusive).
    pub created_before: Option<DateTime<FixedOffset>>,
}

impl ListFilter {
    /// Encode the filter as upstream query parameters for one page.
    #[must_use]
    pub fn query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", page.to_string())];

        if let Some(merchant) = self.merchant {
            params.push(("merchant", merchant.to_string()));
        }
        if let Some(after) = self.created_after {
            params.push(("created_at__gte", iso_micros(after)));
        }
        if let Some(before) = self.created_before {
            params.push(("created_at__lte", iso_micros(before)));
        }

        params
    }
}

/// Microsecond-precision ISO 8601, matching the upstream's filter format.
fn iso_micros(instant: DateTime<FixedOffset>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, false)
}
