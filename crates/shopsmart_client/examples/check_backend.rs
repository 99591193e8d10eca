use shopsmart_client::{HealthClient, config::Config, http_client::ReqwestHealthClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: reads SHOPSMART_BACKEND_URL from env (defaults to localhost:5000)
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = ReqwestHealthClient::new(&cfg.backend_url);
    match client.fetch_health().await {
        Ok(health) => println!(
            "Status: {}\nMessage: {}\nTimestamp: {}",
            health.status, health.message, health.timestamp
        ),
        Err(e) => eprintln!("{} unreachable: {}", client.health_url(), e),
    }
    Ok(())
}
