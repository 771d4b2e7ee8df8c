//! ACME Settlement HTTP API Service.
//!
//! This crate provides the HTTP API around the settlement pipeline:
//!
//! - `GET /settlement` - settlement report for a merchant and date
//! - `GET /merchants` - merchant listing (first upstream page)
//! - `GET /health` - upstream connectivity probe
//! - `GET /api` - service descriptor
//!
//! The interesting logic lives in [`settlement::SettlementService`], which
//! validates the merchant, derives the timezone-aware window, sweeps the
//! paginated transaction listing, and reduces the results into a report
//! with embedded upstream-failure diagnostics.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for routing consistency

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod settlement;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use settlement::{SettlementError, SettlementService};
pub use state::AppState;
