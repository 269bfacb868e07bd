//! Reserva - booking backend HTTP server.

use std::sync::Arc;

use reserva_api::{build_router, AppContext};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging first so .env loading is visible.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(_) => tracing::debug!("no .env file found"),
    }

    let config = reserva_infra::config::load()?;
    let bind_addr = config.server.bind_addr.clone();
    tracing::info!(environment = %config.environment, %bind_addr, "starting reserva");

    let ctx = Arc::new(AppContext::from_config(config)?);
    let router = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
