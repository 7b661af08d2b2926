//! Groundwater assistant HTTP server.

use anyhow::{Context as _, Result};
use clap::Parser as _;
use ingres_core::IngresConfig;
use ingres_server::cli::Cli;
use ingres_server::{AppState, app, build_engine};
use tokio::net::TcpListener;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ingres_server=info,ingres_engine=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = IngresConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    if let Some(path) = cli
        .export_config(&config)
        .context("Failed to write config")?
    {
        tracing::info!(path = %path.display(), "Wrote effective config");
        return Ok(());
    }

    let addr = cli.listen_addr(&config);
    let state = AppState::new(build_engine(&config, !cli.no_upstream));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Starting ingres-server");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
