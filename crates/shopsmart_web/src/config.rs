//! Page server configuration.

use std::net::SocketAddr;

use shopsmart_client::ConfigError;
use shopsmart_client::config::Config as ClientConfig;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address the page server binds to.
    pub addr: SocketAddr,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
    pub client: ClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Like [`ServerConfig::from_env`] but with an injectable lookup so tests
    /// never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let raw_addr = get("SHOPSMART_ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.into());
        let addr = raw_addr.parse::<SocketAddr>().map_err(|e| {
            ConfigError::Invalid(format!("SHOPSMART_ADDRESS {raw_addr:?} is not a socket address: {e}"))
        })?;
        // SHOPSMART_LOG_LEVEL takes priority over RUST_LOG
        let log_filter = get("SHOPSMART_LOG_LEVEL")
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());
        let client = ClientConfig::from_env_with(&mut get)?;
        Ok(Self {
            addr,
            log_filter,
            client,
        })
    }
}
