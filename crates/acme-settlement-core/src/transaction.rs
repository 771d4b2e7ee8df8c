//! Transaction records as returned by the ACME API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The type tag the upstream puts on a transaction.
///
/// `SALE` and `PURCHASE` both represent money owed to the merchant; `REFUND`
/// represents money owed back. Anything else is preserved verbatim and
/// contributes to neither settlement total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// A sale.
    Sale,
    /// A purchase (treated identically to a sale).
    Purchase,
    /// A refund back to the customer.
    Refund,
    /// Any type tag this service does not recognize.
    #[serde(untagged)]
    Other(String),
}

impl TransactionType {
    /// Whether this type contributes to the purchase total.
    #[must_use]
    pub fn is_purchase(&self) -> bool {
        matches!(self, Self::Sale | Self::Purchase)
    }

    /// Whether this type contributes to the refund total.
    #[must_use]
    pub fn is_refund(&self) -> bool {
        matches!(self, Self::Refund)
    }
}

/// A transaction fetched from the upstream API.
///
/// Treated as a read-only fact. The amount is an exact decimal parsed from
/// the upstream's string representation; fields this service does not model
/// are carried through to the report untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction type tag.
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Monetary amount as an exact decimal. Missing amounts count as zero.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub amount: Decimal,

    /// Any other fields the upstream sends, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
