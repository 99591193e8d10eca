//! Custom error types for the page server.

use thiserror::Error;

/// Page server errors.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Configuration error: {0}")]
    Config(#[from] shopsmart_client::ConfigError),

    #[error("Failed to bind to address {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Result type alias for page server operations.
pub type WebResult<T> = Result<T, WebError>;
