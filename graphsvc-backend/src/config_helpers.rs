use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use graphsvc_graph::{GraphClient, InMemoryGraph};
use graphsvc_jobs::{ingest_worker, IngestWorker};

/// Build the graph store client named by `graph.driver`.
pub fn graph_client_from_config(
    cfg: &graphsvc_config::GraphConfig,
) -> anyhow::Result<Arc<dyn GraphClient>> {
    match cfg.driver.as_str() {
        "memory" => {
            tracing::info!(driver = "memory", "using in-process graph store");
            Ok(Arc::new(InMemoryGraph::new()))
        }
        other => anyhow::bail!("unsupported graph driver '{other}'"),
    }
}

/// `0` means wait for the in-flight job for as long as it takes.
pub fn shutdown_grace_period(cfg: &graphsvc_config::WorkerConfig) -> Option<Duration> {
    match cfg.shutdown_grace_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

/// Build the ingestion worker, stopped, with the configured grace period.
pub fn worker_from_config(
    cfg: &graphsvc_config::WorkerConfig,
    graph: Arc<dyn GraphClient>,
) -> IngestWorker {
    ingest_worker(graph).with_grace_period(shutdown_grace_period(cfg))
}

/// Resolve `server.host` and `server.port` to the address to bind.
///
/// IP literals are used as-is. Hostnames go through the system resolver and
/// the first address wins. A host that does not resolve is an error.
pub async fn resolve_bind_address(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("failed to resolve bind host '{host}'"))?
        .next()
        .with_context(|| format!("bind host '{host}' resolved to no addresses"))
}
