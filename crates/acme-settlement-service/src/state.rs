//! Application state.

use std::sync::Arc;

use acme_settlement_client::AcmeClient;

use crate::config::ServiceConfig;
use crate::settlement::SettlementService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Upstream ACME API client (shared connection pool).
    pub client: Arc<AcmeClient>,

    /// Settlement calculation pipeline.
    pub settlement: SettlementService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let client = Arc::new(AcmeClient::new(&config.acme));
        let settlement = SettlementService::new(Arc::clone(&client));

        Self {
            config,
            client,
            settlement,
        }
    }
}
