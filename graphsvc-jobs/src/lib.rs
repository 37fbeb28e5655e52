//! Concrete graph-mutation jobs for the ingestion worker.
//!
//! # Job Types
//!
//! - `episode.add` - Add one conversational message to the graph as an episode
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use graphsvc_graph::InMemoryGraph;
//! use graphsvc_jobs::ingest_worker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let worker = ingest_worker(Arc::new(InMemoryGraph::new()));
//!     worker.start();
//!     worker.stop().await;
//! }
//! ```

mod episode;
mod executor;

use std::sync::Arc;

use graphsvc_graph::GraphClient;
use graphsvc_job_queue::{AsyncWorker, QueuedJob};

pub use episode::EpisodeJob;
pub use executor::GraphJobExecutor;

/// Job type constants for type-safe job references.
pub mod job_types {
    pub const EPISODE_ADD: &str = "episode.add";
}

/// A graph mutation deferred to the worker loop.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestJob {
    AddEpisode(EpisodeJob),
}

impl QueuedJob for IngestJob {
    fn job_type(&self) -> &'static str {
        match self {
            Self::AddEpisode(_) => job_types::EPISODE_ADD,
        }
    }

    fn job_key(&self) -> String {
        match self {
            Self::AddEpisode(episode) => episode
                .uuid
                .clone()
                .unwrap_or_else(|| format!("{}/{}", episode.group_id, episode.name)),
        }
    }
}

/// Worker type used by the service.
pub type IngestWorker = AsyncWorker<IngestJob>;

/// Build a stopped worker that applies ingest jobs to `graph`.
pub fn ingest_worker(graph: Arc<dyn GraphClient>) -> IngestWorker {
    AsyncWorker::new(Arc::new(GraphJobExecutor::new(graph)))
}
