//! Application state shared across handlers.

use database::Database;

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Shared secret required from the auth gateway.
    pub gateway_token: Option<String>,
    /// Back-office token.
    pub admin_token: Option<String>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            db,
            gateway_token: config.gateway_token.clone(),
            admin_token: config.admin_token.clone(),
        }
    }
}
