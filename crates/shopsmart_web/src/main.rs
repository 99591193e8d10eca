use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;

use shopsmart_client::HealthClient;
use shopsmart_client::http_client::ReqwestHealthClient;
use shopsmart_client::observability::FETCH_TOTAL;
use shopsmart_web::config::ServerConfig;
use shopsmart_web::{AppState, WebError};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cfg = ServerConfig::from_env()?;

    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(shopsmart_web::env_filter(&cfg.log_filter))
        .init();
    tracing::info!(log_env = %cfg.log_filter, "shopsmart_web: log filter");

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(WebError::from)?;
    metrics::describe_counter!(FETCH_TOTAL, "Backend health fetches by outcome");

    let client: Arc<dyn HealthClient> =
        Arc::new(ReqwestHealthClient::new(&cfg.client.backend_url));
    tracing::info!(backend = %cfg.client.backend_url, "mounting status display");
    let state = Arc::new(AppState::mount(client, Some(handle)));

    let listener = tokio::net::TcpListener::bind(cfg.addr)
        .await
        .map_err(|source| WebError::Bind {
            addr: cfg.addr,
            source,
        })?;
    tracing::info!(addr = %cfg.addr, "starting HTTP server");

    shopsmart_web::serve(listener, state, async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("shutdown signal received"),
            Err(e) => {
                tracing::error!("failed to install ctrl+c handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    })
    .await?;

    tracing::info!("server stopped");
    Ok(())
}
