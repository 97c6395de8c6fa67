//! NASA Explorer HTTP Server Binary
//!
//! Main entry point for the proxy REST API. It loads the upstream
//! configuration from the environment, sets up the HTTP router, and starts
//! serving requests.
//!
//! # Usage
//!
//! ```bash
//! NASA_API_KEY=... cargo run --bin nasa-explorer-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `NASA_API_KEY`: Server-side APOD credential (APOD requests fail without it)
//! - `NASA_API_BASE` / `NASA_IMAGES_API_BASE`: Upstream base URL overrides
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use nasa_explorer::http::{create_router, AppState};
use nasa_explorer::nasa::{NasaClient, NasaConfig, NasaProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting NASA Explorer server");

    let config = NasaConfig::from_env();
    if config.api_key.is_none() {
        // Not fatal at startup: the image search endpoint needs no key, and
        // APOD requests answer with a configuration error until one is set.
        warn!("NASA_API_KEY is not set; /api/apod requests will fail with a 500");
    }
    info!(api_base = %config.api_base, images_api_base = %config.images_api_base, "upstream configured");

    let provider = Arc::new(NasaClient::new(config)) as Arc<dyn NasaProvider>;
    let state = AppState::new(provider);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
