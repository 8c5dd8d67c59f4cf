//! crcrisk web server
//!
//! Run with: cargo run -p crcrisk-web

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crcrisk_common::AppConfig;
use crcrisk_web::{router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crcrisk=debug,info")),
        )
        .init();

    info!("Starting crcrisk web server v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    let state = AppState::new(&config)?;
    info!(
        "Signature loaded: {} ({} genes, reference {}, cutoff {})",
        state.signature.name(),
        state.signature.len(),
        state.signature.reference_gene(),
        state.signature.cutoff()
    );

    let app = build_router(state);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
