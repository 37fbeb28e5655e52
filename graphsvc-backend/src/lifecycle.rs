//! Process-level setup and teardown around the HTTP server.

use std::future::Future;
use std::sync::Arc;

use graphsvc_graph::GraphError;
use graphsvc_job_queue::StopReport;
use tokio::net::TcpListener;
use tracing::info;

use crate::app::build_router;
use crate::state::AppState;

/// Prepare the graph store and start the worker loop. Run once before serving traffic.
pub async fn initialize(state: &AppState) -> Result<(), GraphError> {
    state.graph.ping().await?;
    state.graph.build_indices_and_constraints().await?;
    state.worker.start();
    info!("graph store ready, ingestion worker started");
    Ok(())
}

/// Stop the worker loop and discard whatever is still queued. Run once after traffic stops.
pub async fn shutdown(state: &AppState) -> StopReport {
    let report = state.worker.stop().await;
    info!(
        drained = report.drained,
        aborted = report.aborted,
        "ingestion worker stopped"
    );
    report
}

/// Serve the API on `listener` until `signal` resolves, then stop the worker.
///
/// The worker is stopped whether or not serving ended in an error.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    signal: F,
) -> std::io::Result<StopReport>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state.clone());
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await;
    let report = shutdown(&state).await;
    served.map(|()| report)
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
