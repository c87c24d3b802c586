//! Service configuration, read from the environment (and `.env` if present).

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 16;

#[derive(Clone)]
pub struct Config {
    /// SQLite connection URL. Without one the registry runs on the in-memory store.
    pub database_url: Option<String>,
    pub bind_address: String,
    /// Origin the browser frontend is served from.
    pub cors_origin: String,
    pub max_connections: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("bind_address", &self.bind_address)
            .field("cors_origin", &self.cors_origin)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid DB_MAX_CONNECTIONS: {0}")]
    InvalidMaxConnections(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars.get("DATABASE_URL").filter(|url| !url.is_empty()).cloned();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned());

        let cors_origin = vars
            .get("CORS_ORIGIN")
            .cloned()
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_owned());

        let max_connections = match vars.get("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(value) => match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxConnections(value.clone())),
            },
        };

        Ok(Config {
            database_url,
            bind_address,
            cors_origin,
            max_connections,
        })
    }
}
