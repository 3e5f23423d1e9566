use std::sync::Arc;

use anyhow::Context;

use super::services::{BillOperations, UserOperations};
use crate::config::AppConfig;
use crate::downstream::{JsonCodec, ServiceClient};

/// Gateway shared state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// User service operations (also the owner lookup for bills)
    pub users: Arc<UserOperations>,
    /// Bill service operations
    pub bills: Arc<BillOperations>,
}

impl AppState {
    pub fn new(users: Arc<UserOperations>, bills: Arc<BillOperations>) -> Self {
        Self { users, bills }
    }

    /// One client per backend, both sharing the configured codec.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let codec = JsonCodec::new(config.codec.timestamps);
        let services = &config.services;

        let user_client = ServiceClient::new("users", &services.users, codec)
            .context("Failed to build user service client")?;
        let bill_client = ServiceClient::new("bills", &services.bills, codec)
            .context("Failed to build bill service client")?;

        tracing::info!(
            users = %user_client.base_url(),
            bills = %bill_client.base_url(),
            timestamps = ?codec.timestamps(),
            "Downstream services configured"
        );

        let users = Arc::new(UserOperations::new(
            Arc::new(user_client),
            services.users.sort_param.clone(),
        ));
        let bills = Arc::new(BillOperations::new(
            Arc::new(bill_client),
            users.clone(),
            services.bills.sort_param.clone(),
        ));
        Ok(Self::new(users, bills))
    }
}
