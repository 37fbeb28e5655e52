use std::sync::Arc;

use graphsvc_graph::GraphClient;
use graphsvc_jobs::{ingest_worker, IngestWorker};

/// Shared application state passed to every route handler.
///
/// The worker is owned here rather than living in a global so each test can
/// run against its own queue.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<dyn GraphClient>,
    pub worker: Arc<IngestWorker>,
}

impl AppState {
    /// Build a state container from its constituent parts.
    pub fn new(graph: Arc<dyn GraphClient>, worker: IngestWorker) -> Self {
        Self {
            graph,
            worker: Arc::new(worker),
        }
    }

    /// State whose worker applies jobs to `graph`, without a shutdown grace period.
    pub fn with_graph(graph: Arc<dyn GraphClient>) -> Self {
        let worker = ingest_worker(graph.clone());
        Self::new(graph, worker)
    }
}
