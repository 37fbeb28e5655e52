//! Executor applying ingest jobs to a graph store.

use std::sync::Arc;

use graphsvc_graph::GraphClient;
use graphsvc_job_queue::{async_trait, JobExecutor, JobQueueError};
use tracing::info;

use crate::IngestJob;

/// Runs [`IngestJob`]s against the shared graph client.
pub struct GraphJobExecutor {
    graph: Arc<dyn GraphClient>,
}

impl GraphJobExecutor {
    pub fn new(graph: Arc<dyn GraphClient>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl JobExecutor<IngestJob> for GraphJobExecutor {
    async fn execute(&self, job: IngestJob) -> Result<(), JobQueueError> {
        match job {
            IngestJob::AddEpisode(episode) => {
                let preview: String = episode.content.chars().take(50).collect();
                info!(group_id = %episode.group_id, preview = %preview, "processing message");
                self.graph
                    .add_episode(episode.into_add_episode())
                    .await
                    .map_err(|e| JobQueueError::ExecutionFailed(e.to_string()))?;
                info!("message processed and stored in graph");
            }
        }
        Ok(())
    }
}
