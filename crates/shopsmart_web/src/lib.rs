//! Page server for the ShopSmart status page.
//!
//! Routes:
//! - `GET /` renders the status display as HTML
//! - `GET /status` returns the display state as JSON
//! - `GET /health` liveness of this server
//! - `GET /metrics` Prometheus text, when a recorder is installed

pub mod config;
pub mod error;
pub mod state;

use std::future::Future;
use std::time::Duration;

use axum::debug_handler;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::timeout::TimeoutLayer;

use shopsmart_client::ViewState;

pub use error::{WebError, WebResult};
pub use state::{AppState, SharedState};

/// Upper bound for serving a single page request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[debug_handler]
async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(state.display.render())
}

#[debug_handler]
async fn status(State(state): State<SharedState>) -> Json<ViewState> {
    Json(state.display.view())
}

#[debug_handler]
async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[debug_handler]
async fn metrics_endpoint(State(state): State<SharedState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [("content-type", "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/status", get(status))
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .with_state(state)
}

/// Serve the page until `shutdown` resolves.
pub async fn serve<F>(
    listener: tokio::net::TcpListener,
    state: SharedState,
    shutdown: F,
) -> WebResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(WebError::Serve)
}

/// Build the log filter, falling back to `info` when `log_env` does not parse.
pub fn env_filter(log_env: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_new(log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use shopsmart_client::http_client::ReqwestHealthClient;
    use shopsmart_client::mock::MockBackend;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn mounted_state(backend: &MockBackend) -> SharedState {
        let client = Arc::new(ReqwestHealthClient::new(&backend.uri()));
        let state = Arc::new(AppState::mount(client, None));
        state.display.settled().await;
        state
    }

    #[tokio::test]
    async fn index_renders_resolved_page() {
        let backend = MockBackend::start().await;
        let state = mounted_state(&backend).await;

        let (code, body) = get_body(router(state), "/").await;
        assert_eq!(code, StatusCode::OK);
        assert!(body.contains("<h1>ShopSmart</h1>"));
        assert!(body.contains("ShopSmart Backend is running"));
    }

    #[tokio::test]
    async fn status_returns_json_view_state() {
        let backend = MockBackend::start().await;
        backend.respond_with_status(500).await;
        let state = mounted_state(&backend).await;

        let (code, body) = get_body(router(state), "/status").await;
        assert_eq!(code, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v, serde_json::json!({"state": "loading"}));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let backend = MockBackend::start().await;
        let state = mounted_state(&backend).await;

        let (code, body) = get_body(router(state), "/health").await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn metrics_without_recorder_is_not_found() {
        let backend = MockBackend::start().await;
        let state = mounted_state(&backend).await;

        let (code, _) = get_body(router(state), "/metrics").await;
        assert_eq!(code, StatusCode::NOT_FOUND);
    }

    #[test]
    fn env_filter_falls_back_on_invalid_directive() {
        let filter = env_filter("invalid[[[filter");
        assert!(!format!("{:?}", filter).is_empty());
    }
}
