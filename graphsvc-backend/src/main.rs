//! Knowledge-graph ingestion server
//!
//! Entry point: configuration loading, graph store setup, worker startup
//! and HTTP serving with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use graphsvc_backend::lifecycle;
use graphsvc_backend::state::AppState;

mod cli;
mod config_helpers;
mod tracing_setup;

use cli::CliArgs;
use config_helpers::{graph_client_from_config, resolve_bind_address, worker_from_config};
use tracing_setup::install_tracing_from_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    eprintln!("[STARTUP] graphsvc backend starting...");
    let args = CliArgs::parse();

    eprintln!("[STARTUP] Loading config from: {:?}", args.config_path);
    let config = graphsvc_config::load_config(args.config_path.as_deref())
        .context("failed to load configuration")?;
    graphsvc_config::validate_config(&config).context("invalid configuration")?;

    install_tracing_from_config(&config.logging);
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        driver = %config.graph.driver,
        shutdown_grace_secs = config.worker.shutdown_grace_secs,
        "configuration loaded"
    );

    let graph = graph_client_from_config(&config.graph)?;
    let worker = worker_from_config(&config.worker, graph.clone());
    let state = Arc::new(AppState::new(graph, worker));

    let addr = resolve_bind_address(&config.server.host, config.server.port).await?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    lifecycle::initialize(&state)
        .await
        .context("failed to initialize graph store")?;
    tracing::info!(%addr, "listening");

    lifecycle::serve(listener, state, lifecycle::shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
