//! Core types and calculations for the ACME settlement service.
//!
//! This crate provides the foundational pieces of the settlement pipeline:
//!
//! - **Identifiers**: `MerchantId`
//! - **Upstream entities**: `Merchant`, `Transaction`, `TransactionType`
//! - **Periods**: `SettlementPeriod` derivation over IANA timezones
//! - **Reports**: `SettlementReport`, `SettlementSummary`, `ApiErrors`
//! - **Diagnostics**: `FailureRecord`, `ErrorDetail`
//!
//! # Money
//!
//! All monetary amounts are `rust_decimal::Decimal` values serialized as
//! strings. Upstream amounts arrive as decimal strings and are never passed
//! through binary floating point.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod merchant;
pub mod period;
pub mod report;
pub mod transaction;

pub use ids::{IdError, MerchantId};
pub use merchant::Merchant;
pub use period::{resolve_timezone, InvalidTimezone, SettlementPeriod};
pub use report::{ApiErrors, ErrorDetail, FailureKind, FailureRecord, SettlementReport, SettlementSummary};
pub use transaction::{Transaction, TransactionType};
