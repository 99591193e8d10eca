//! `HealthClient` trait, the health payload model and the status display
//! component that renders it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod display;
pub mod http_client;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod observability;
pub mod view;

pub use display::{StatusDisplay, ViewState};

/// Path of the backend health-check endpoint, relative to the base URL.
pub const HEALTH_PATH: &str = "/api/health";

/// Any failure to obtain a [`HealthStatus`]: error status, network error or
/// a body that does not decode. Callers treat all of them the same way.
#[derive(Debug, Error)]
#[error("health fetch failed: {0}")]
pub struct FetchFailure(#[from] reqwest::Error);

impl FetchFailure {
    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        self.0.status().map(|s| s.as_u16())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Invalid(String),
}

/// Payload of `GET /api/health`. All three fields are required.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn new(
        status: impl Into<String>,
        message: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Parsed `timestamp`, if it is valid RFC 3339. Used for diagnostics only;
    /// the view always shows the string as received.
    pub fn timestamp_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&chrono::Utc))
    }
}

#[async_trait]
pub trait HealthClient: Send + Sync + 'static {
    /// Issue one `GET /api/health` and decode the payload.
    async fn fetch_health(&self) -> Result<HealthStatus, FetchFailure>;
}
