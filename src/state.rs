use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::services::payment::{PaymentGateway, SimulatedGateway};

/// Shared application state available to all request handlers via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub payment_gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Build state backed by the simulated payment gateway configured in `config`.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let payment_gateway = Arc::new(SimulatedGateway::new(config.payment_success_threshold));
        Self {
            db,
            config,
            payment_gateway,
        }
    }
}
