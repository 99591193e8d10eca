//! Shared application state.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use shopsmart_client::{HealthClient, StatusDisplay};

/// State held by the page handlers.
///
/// The status display is mounted once, when the state is built, and is
/// unmounted when the last reference to the state goes away.
pub struct AppState {
    pub display: StatusDisplay,
    /// Present only when the binary installed a Prometheus recorder.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Mount the status display against `client`. Must run inside a Tokio runtime.
    pub fn mount(client: Arc<dyn HealthClient>, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            display: StatusDisplay::mount(client),
            metrics,
        }
    }
}

/// Thread-safe alias for `AppState`.
pub type SharedState = Arc<AppState>;
