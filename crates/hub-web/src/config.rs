//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Hub web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Connection pool size.
    pub pool_size: u32,
    /// Shared secret the auth gateway must present, if set.
    pub gateway_token: Option<String>,
    /// Token for back-office routes; unset disables them.
    pub admin_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `HUB_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:upesi.db?mode=rwc` |
    /// | `DATABASE_POOL_SIZE` | Connection pool size | `20` |
    /// | `HUB_GATEWAY_TOKEN` | Auth gateway shared secret | (none) |
    /// | `HUB_ADMIN_TOKEN` | Back-office token | (none) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("HUB_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite:upesi.db?mode=rwc".to_string());

        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidPoolSize(value))?,
            None => database::Database::DEFAULT_POOL_SIZE,
        };

        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            addr,
            database_url,
            pool_size,
            gateway_token: non_empty("HUB_GATEWAY_TOKEN"),
            admin_token: non_empty("HUB_ADMIN_TOKEN"),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid HUB_ADDR format")]
    InvalidAddr,

    #[error("Invalid DATABASE_POOL_SIZE: {0}")]
    InvalidPoolSize(String),
}
