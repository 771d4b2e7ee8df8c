//! Client for the ACME Payments API.
//!
//! This crate wraps the upstream's paginated resources (`/merchants/`,
//! `/transactions/`, `/orders/`) behind a client that retries transient
//! failures with exponential backoff and reports every failed attempt as a
//! structured [`FailureRecord`](acme_settlement_core::FailureRecord) rather
//! than a message string.
//!
//! # Example
//!
//! ```no_run
//! use acme_settlement_client::{AcmeClient, AcmeConfig, ListFilter};
//! use acme_settlement_core::MerchantId;
//!
//! # async fn example() -> Result<(), acme_settlement_client::RequestExhausted> {
//! let client = AcmeClient::new(&AcmeConfig::default());
//! let merchant_id = MerchantId::generate();
//!
//! let fetched = client.merchant(merchant_id).await?;
//! println!("merchant: {}", fetched.body.name);
//! if !fetched.failures.is_empty() {
//!     println!("succeeded after {} failed attempts", fetched.failures.len());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{AcmeClient, AcmeConfig};
pub use error::RequestExhausted;
pub use types::{Fetched, ListFilter, Page};
