/**
 * Huddle Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads the configuration and serves the
 * chat backend until Ctrl-C.
 */

use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;
use huddle::backend::server::{config::load_config, init::create_app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    let dotenv_path = dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Some(path) = dotenv_path {
        tracing::info!("[Server] Loaded environment from {}", path.display());
    }

    let config = load_config()?;
    let addr = SocketAddr::new(config.host, config.port);

    let app = create_app(config).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[Server] Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("[Server] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("[Server] Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("[Server] Shutdown signal received");
}
