//! Settlement report assembly and upstream failure diagnostics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MerchantId, SettlementPeriod, Transaction};

/// Structured record of one failed attempt against the upstream API.
///
/// Produced per attempt and never discarded, even when a later retry
/// succeeds; the attempt history is surfaced to callers as diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// 1-based attempt number within one logical call.
    pub attempt: u32,

    /// HTTP status code, when the upstream answered at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// What went wrong.
    pub error_kind: FailureKind,

    /// Transport-level detail, when there is any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FailureRecord {
    /// Record a non-200 response.
    #[must_use]
    pub fn http(attempt: u32, status_code: u16) -> Self {
        Self {
            attempt,
            status_code: Some(status_code),
            error_kind: FailureKind::Http,
            message: None,
        }
    }

    /// Record a request timeout.
    #[must_use]
    pub fn timeout(attempt: u32) -> Self {
        Self {
            attempt,
            status_code: None,
            error_kind: FailureKind::Timeout,
            message: None,
        }
    }

    /// Record a transport-level failure (connect error, body decode, ...).
    #[must_use]
    pub fn transport(attempt: u32, message: impl Into<String>) -> Self {
        Self {
            attempt,
            status_code: None,
            error_kind: FailureKind::Transport,
            message: Some(message.into()),
        }
    }
}

/// Classification of a failed upstream attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The upstream answered with a non-200 status.
    #[serde(rename = "http_error")]
    Http,

    /// The request hit the per-request timeout.
    #[serde(rename = "timeout")]
    Timeout,

    /// The request failed below HTTP (connect, TLS, body decode).
    #[serde(rename = "request_exception")]
    Transport,
}

/// One entry of a report's `api_errors.error_details` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A failed attempt that preceded an eventual success.
    Attempt(FailureRecord),

    /// A page fetch that exhausted its retry budget and stopped pagination.
    Page {
        /// The page that could not be fetched.
        page: u32,
        /// Fixed description of the stop condition.
        error: String,
        /// The attempt history behind the exhaustion.
        details: Vec<FailureRecord>,
    },
}

impl ErrorDetail {
    /// Build the page-level stop record for an exhausted page fetch.
    #[must_use]
    pub fn page_failure(page: u32, details: Vec<FailureRecord>) -> Self {
        Self::Page {
            page,
            error: "Failed to fetch page".to_string(),
            details,
        }
    }
}

/// The `api_errors` block of a settlement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrors {
    /// Number of diagnostic entries.
    pub total_errors: usize,

    /// The entries themselves, in the order they occurred.
    pub error_details: Vec<ErrorDetail>,
}

impl ApiErrors {
    /// Wrap collected diagnostics, or `None` when there is nothing to
    /// report so the field serializes away entirely.
    #[must_use]
    pub fn from_details(error_details: Vec<ErrorDetail>) -> Option<Self> {
        if error_details.is_empty() {
            None
        } else {
            Some(Self {
                total_errors: error_details.len(),
                error_details,
            })
        }
    }
}

/// Monetary reduction over a set of transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Sum of SALE and PURCHASE amounts.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_purchases: Decimal,

    /// Sum of REFUND amounts.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_refunds: Decimal,

    /// Count of all transactions in the window, recognized or not.
    pub transaction_count: usize,

    /// `total_purchases - total_refunds`.
    #[serde(with = "rust_decimal::serde::str")]
    pub net_settlement: Decimal,
}

impl SettlementSummary {
    /// Reduce transactions into settlement totals.
    ///
    /// Unrecognized types contribute to neither total but are still
    /// counted.
    #[must_use]
    pub fn of(transactions: &[Transaction]) -> Self {
        let mut total_purchases = Decimal::ZERO;
        let mut total_refunds = Decimal::ZERO;

        for tx in transactions {
            if tx.kind.is_purchase() {
                total_purchases += tx.amount;
            } else if tx.kind.is_refund() {
                total_refunds += tx.amount;
            }
        }

        Self {
            total_purchases,
            total_refunds,
            transaction_count: transactions.len(),
            net_settlement: total_purchases - total_refunds,
        }
    }
}

/// A complete settlement report for one merchant and date.
///
/// Constructed once per request and immutable after that. `api_errors` is
/// present only when upstream failures occurred along the way; its absence
/// distinguishes a complete settlement from a best-effort one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    /// The merchant the settlement is for.
    pub merchant_id: MerchantId,

    /// Merchant display name, from the validated lookup.
    pub merchant_name: String,

    /// The settlement date the window was derived from.
    pub settlement_date: chrono::NaiveDate,

    /// The derived instant window.
    pub settlement_period: SettlementPeriod,

    /// Net payable amount; always equals `summary.net_settlement`.
    #[serde(with = "rust_decimal::serde::str")]
    pub settlement_amount: Decimal,

    /// Monetary totals.
    pub summary: SettlementSummary,

    /// Every transaction attributed to the window, echoed from upstream.
    pub transactions: Vec<Transaction>,

    /// Upstream failure diagnostics, omitted when none occurred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_errors: Option<ApiErrors>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransactionType;
    use chrono_tz::Tz;

    fn tx(kind: &str, amount: &str) -> Transaction {
        serde_json::from_value(serde_json::json!({"type": kind, "amount": amount}))
            .expect("deserializes")
    }

    #[test]
    fn summary_sums_purchases_and_refunds_exactly() {
        let transactions = vec![tx("SALE", "10.10"), tx("REFUND", "0.05")];
        let summary = SettlementSummary::of(&transactions);

        assert_eq!(summary.total_purchases.to_string(), "10.10");
        assert_eq!(summary.total_refunds.to_string(), "0.05");
        assert_eq!(summary.net_settlement.to_string(), "10.05");
        assert_eq!(summary.transaction_count, 2);
    }

    #[test]
    fn sale_and_purchase_accumulate_together() {
        let transactions = vec![tx("SALE", "1.01"), tx("PURCHASE", "2.02")];
        let summary = SettlementSummary::of(&transactions);

        assert_eq!(summary.total_purchases.to_string(), "3.03");
        assert_eq!(summary.total_refunds, Decimal::ZERO);
    }

    #[test]
    fn unrecognized_types_count_but_do_not_sum() {
        let transactions = vec![tx("SALE", "5.00"), tx("ADJUSTMENT", "99.99")];
        let summary = SettlementSummary::of(&transactions);

        assert_eq!(summary.total_purchases.to_string(), "5.00");
        assert_eq!(summary.net_settlement.to_string(), "5.00");
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(
            transactions[1].kind,
            TransactionType::Other("ADJUSTMENT".into())
        );
    }

    #[test]
    fn empty_window_settles_to_zero() {
        let summary = SettlementSummary::of(&[]);

        assert_eq!(summary.net_settlement.to_string(), "0");
        assert_eq!(summary.transaction_count, 0);
    }

    #[test]
    fn api_errors_absent_when_no_details() {
        assert_eq!(ApiErrors::from_details(Vec::new()), None);

        let errors = ApiErrors::from_details(vec![ErrorDetail::Attempt(FailureRecord::http(1, 500))])
            .expect("present");
        assert_eq!(errors.total_errors, 1);
    }

    #[test]
    fn failure_records_serialize_with_wire_kind_names() {
        let record = FailureRecord::http(2, 503);
        let json = serde_json::to_value(&record).expect("serializes");
        assert_eq!(json["error_kind"], "http_error");
        assert_eq!(json["status_code"], 503);
        assert_eq!(json["attempt"], 2);
        assert!(json.get("message").is_none());

        let timeout = serde_json::to_value(FailureRecord::timeout(1)).expect("serializes");
        assert_eq!(timeout["error_kind"], "timeout");
        assert!(timeout.get("status_code").is_none());

        let transport =
            serde_json::to_value(FailureRecord::transport(3, "connection refused"))
                .expect("serializes");
        assert_eq!(transport["error_kind"], "request_exception");
        assert_eq!(transport["message"], "connection refused");
    }

    #[test]
    fn page_failure_detail_names_the_page() {
        let detail = ErrorDetail::page_failure(2, vec![FailureRecord::http(1, 500)]);
        let json = serde_json::to_value(&detail).expect("serializes");
        assert_eq!(json["page"], 2);
        assert_eq!(json["error"], "Failed to fetch page");
        assert_eq!(json["details"][0]["error_kind"], "http_error");
    }

    #[test]
    fn report_omits_api_errors_when_clean() {
        let report = SettlementReport {
            merchant_id: MerchantId::generate(),
            merchant_name: "Widgets Inc".into(),
            settlement_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"),
            settlement_period: SettlementPeriod::for_date(
                chrono::NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"),
                Tz::UTC,
            ),
            settlement_amount: Decimal::ZERO,
            summary: SettlementSummary::of(&[]),
            transactions: Vec::new(),
            api_errors: None,
        };

        let json = serde_json::to_value(&report).expect("serializes");
        assert!(json.get("api_errors").is_none());
        assert_eq!(json["settlement_amount"], "0");
        assert_eq!(json["settlement_date"], "2024-03-15");
        assert_eq!(
            json["settlement_period"]["end"],
            "2024-03-15T23:59:59.999999+00:00"
        );
    }
}
