use std::sync::Arc;
use std::time::Duration;

use log::info;

use brain_rest_api::discovery::ConsulDiscovery;
use brain_rest_api::handlers::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();

    let consul_url =
        std::env::var("CONSUL_URL").unwrap_or_else(|_| "http://consul:8500".to_string());
    let port: u16 = std::env::var("BRAIN_API_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4207);
    let timeout_secs: u64 = std::env::var("PROXY_TIMEOUT_SECS")
        .ok()
        .and_then(|t| t.parse().ok())
        .unwrap_or(60);

    info!("Service discovery via {}", consul_url);

    let state = Arc::new(AppState {
        discovery: Arc::new(ConsulDiscovery::new(consul_url)),
        proxy_timeout: Duration::from_secs(timeout_secs),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
