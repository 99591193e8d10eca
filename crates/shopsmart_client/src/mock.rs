//! Test-only backend standing in for the real `/api/health` endpoint.
//!
//! Every test starts its own [`MockBackend`], so overrides never leak between
//! tests; [`MockBackend::reset`] restores the default handler for tests that
//! reuse one instance across cases.

use std::net::TcpListener;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{HEALTH_PATH, HealthStatus};

// wiremock picks the lowest priority value among matching mocks.
const DEFAULT_PRIORITY: u8 = 10;
const OVERRIDE_PRIORITY: u8 = 1;

pub struct MockBackend {
    server: MockServer,
    unreachable: Option<String>,
}

impl MockBackend {
    /// Start a backend serving [`MockBackend::default_health`].
    pub async fn start() -> Self {
        let backend = Self {
            server: MockServer::start().await,
            unreachable: None,
        };
        backend.mount_default().await;
        backend
    }

    pub fn default_health() -> HealthStatus {
        HealthStatus::new(
            "ok",
            "ShopSmart Backend is running",
            "2026-01-01T00:00:00.000Z",
        )
    }

    /// Base URL to hand to the client under test.
    pub fn uri(&self) -> String {
        match &self.unreachable {
            Some(addr) => addr.clone(),
            None => self.server.uri(),
        }
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.uri(), HEALTH_PATH)
    }

    pub async fn respond_with_health(&self, health: &HealthStatus) {
        self.mount_override(ResponseTemplate::new(200).set_body_json(health))
            .await;
    }

    /// Respond with `code` and an empty body.
    pub async fn respond_with_status(&self, code: u16) {
        self.mount_override(ResponseTemplate::new(code)).await;
    }

    pub async fn respond_with_raw(&self, code: u16, body: &str) {
        self.mount_override(ResponseTemplate::new(code).set_body_string(body))
            .await;
    }

    /// Serve the default payload only after `delay`.
    pub async fn respond_with_delay(&self, delay: Duration) {
        self.mount_override(
            ResponseTemplate::new(200)
                .set_body_json(Self::default_health())
                .set_delay(delay),
        )
        .await;
    }

    /// Make requests fail at the connection level. [`MockBackend::uri`] then
    /// points at a local port nobody listens on.
    pub fn fail_network(&mut self) {
        self.unreachable = Some(unreachable_uri());
    }

    /// Drop every override and restore the default handler.
    pub async fn reset(&mut self) {
        self.unreachable = None;
        self.server.reset().await;
        self.mount_default().await;
    }

    /// Number of health requests that reached the server.
    pub async fn received_health_requests(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == HEALTH_PATH)
            .count()
    }

    async fn mount_default(&self) {
        Mock::given(method("GET"))
            .and(path(HEALTH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(Self::default_health()))
            .with_priority(DEFAULT_PRIORITY)
            .mount(&self.server)
            .await;
    }

    async fn mount_override(&self, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(HEALTH_PATH))
            .respond_with(response)
            .with_priority(OVERRIDE_PRIORITY)
            .mount(&self.server)
            .await;
    }
}

/// Bind an ephemeral port and release it straight away, leaving an address
/// that refuses connections.
fn unreachable_uri() -> String {
    match TcpListener::bind("127.0.0.1:0").and_then(|l| l.local_addr()) {
        Ok(addr) => format!("http://{addr}"),
        // Port 9 (discard) is practically never served on loopback.
        Err(_) => "http://127.0.0.1:9".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_handler_serves_ok_payload() {
        let backend = MockBackend::start().await;
        let body: HealthStatus = reqwest::get(backend.health_url())
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        assert_eq!(body, MockBackend::default_health());
        assert_eq!(backend.received_health_requests().await, 1);
    }

    #[tokio::test]
    async fn override_wins_and_reset_restores_default() {
        let mut backend = MockBackend::start().await;
        backend.respond_with_status(503).await;
        let resp = reqwest::get(backend.health_url()).await.expect("request");
        assert_eq!(resp.status().as_u16(), 503);

        backend.reset().await;
        let resp = reqwest::get(backend.health_url()).await.expect("request");
        assert_eq!(resp.status().as_u16(), 200);
        // reset also clears the recorded requests
        assert_eq!(backend.received_health_requests().await, 1);
    }

    #[tokio::test]
    async fn fail_network_refuses_connections() {
        let mut backend = MockBackend::start().await;
        backend.fail_network();
        let err = reqwest::get(backend.health_url())
            .await
            .expect_err("connection should be refused");
        assert!(err.is_connect() || err.is_request());

        backend.reset().await;
        assert!(reqwest::get(backend.health_url()).await.is_ok());
    }
}
