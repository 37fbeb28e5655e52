//! The graph-store capability the service depends on.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AddEpisode, EntityNode, NewEntityNode};

/// Operations the ingestion service needs from a graph store.
///
/// Implementations are only required to be safe for sequential use; the
/// worker loop never issues two calls at once. Nothing here is retried by
/// the caller.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Verify connectivity to the store.
    async fn ping(&self) -> Result<()>;

    /// Ingest one episode into the graph.
    async fn add_episode(&self, episode: AddEpisode) -> Result<()>;

    /// Create or replace an entity node and return the stored representation.
    async fn save_entity_node(&self, node: NewEntityNode) -> Result<EntityNode>;

    async fn delete_entity_edge(&self, uuid: &str) -> Result<()>;

    /// Remove every node and edge belonging to a group.
    async fn delete_group(&self, group_id: &str) -> Result<()>;

    async fn delete_episodic_node(&self, uuid: &str) -> Result<()>;

    /// Remove all graph data.
    async fn clear_data(&self) -> Result<()>;

    async fn build_indices_and_constraints(&self) -> Result<()>;
}
