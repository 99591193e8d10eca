//! HTTP client implementation for the backend health-check endpoint.
//!
//! This module provides a reqwest-based implementation of the [`HealthClient`](crate::HealthClient) trait.

use crate::{FetchFailure, HEALTH_PATH, HealthClient, HealthStatus};
use async_trait::async_trait;

/// Client for the backend health endpoint using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestHealthClient {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestHealthClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - Root of the backend (e.g., "http://127.0.0.1:5000")
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a pre-built reqwest client. No request timeout is applied here;
    /// a caller wanting one configures it on `client`.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, HEALTH_PATH)
    }
}

#[async_trait]
impl HealthClient for ReqwestHealthClient {
    async fn fetch_health(&self) -> Result<HealthStatus, FetchFailure> {
        let url = self.health_url();
        tracing::debug!(%url, "fetching backend health");
        let resp = self.client.get(&url).send().await?.error_for_status()?;
        Ok(resp.json::<HealthStatus>().await?)
    }
}
