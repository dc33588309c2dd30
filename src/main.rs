//! Venue service binary
//!
//! Usage: `restaurants [config.yaml]`. Without an argument the path is read
//! from `RESTAURANTS_CONFIG`; without either, defaults are used.

use anyhow::Result;
use restaurants::config::ServiceConfig;
use restaurants::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("RESTAURANTS_CONFIG").ok());
    let config = ServiceConfig::load(path.as_deref())?;

    ServerBuilder::new()
        .with_configured_store(&config)
        .await?
        .serve(&config.server.bind)
        .await
}
