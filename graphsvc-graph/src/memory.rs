//! In-process graph store.
//!
//! Keeps episodes, entity nodes and entity edges in hash maps behind a single
//! lock. Used when the service runs without an external database and as the
//! default collaborator in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::GraphClient;
use crate::error::{GraphError, Result};
use crate::types::{AddEpisode, EntityEdge, EntityNode, EpisodicNode, NewEntityNode};

const ENTITY_LABEL: &str = "Entity";

#[derive(Debug, Default)]
struct GraphData {
    episodes: HashMap<String, EpisodicNode>,
    entities: HashMap<String, EntityNode>,
    edges: HashMap<String, EntityEdge>,
    indices_built: bool,
}

#[derive(Debug, Default)]
pub struct InMemoryGraph {
    data: RwLock<GraphData>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an edge directly. Edge extraction is not performed by this store.
    pub async fn insert_entity_edge(&self, edge: EntityEdge) {
        let mut data = self.data.write().await;
        data.edges.insert(edge.uuid.clone(), edge);
    }

    pub async fn episode(&self, uuid: &str) -> Option<EpisodicNode> {
        self.data.read().await.episodes.get(uuid).cloned()
    }

    /// Episodes of a group, oldest reference time first.
    pub async fn episodes_in_group(&self, group_id: &str) -> Vec<EpisodicNode> {
        let data = self.data.read().await;
        let mut episodes: Vec<EpisodicNode> = data
            .episodes
            .values()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        episodes.sort_by_key(|e| (e.valid_at, e.created_at));
        episodes
    }

    pub async fn entity_node(&self, uuid: &str) -> Option<EntityNode> {
        self.data.read().await.entities.get(uuid).cloned()
    }

    pub async fn entity_edge(&self, uuid: &str) -> Option<EntityEdge> {
        self.data.read().await.edges.get(uuid).cloned()
    }

    pub async fn indices_built(&self) -> bool {
        self.data.read().await.indices_built
    }

    /// Total number of episodes, entity nodes and entity edges.
    pub async fn len(&self) -> usize {
        let data = self.data.read().await;
        data.episodes.len() + data.entities.len() + data.edges.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl GraphClient for InMemoryGraph {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn add_episode(&self, episode: AddEpisode) -> Result<()> {
        let uuid = match episode.uuid {
            Some(uuid) if uuid.trim().is_empty() => {
                return Err(GraphError::Validation("episode uuid must not be blank".into()))
            }
            Some(uuid) => uuid,
            None => Uuid::new_v4().to_string(),
        };

        let node = EpisodicNode {
            uuid: uuid.clone(),
            name: episode.name,
            group_id: episode.group_id,
            source: episode.source,
            source_description: episode.source_description,
            content: episode.episode_body,
            valid_at: episode.reference_time,
            created_at: Utc::now(),
        };
        debug!(uuid = %uuid, group_id = %node.group_id, source = %node.source, "storing episode");
        self.data.write().await.episodes.insert(uuid, node);
        Ok(())
    }

    async fn save_entity_node(&self, node: NewEntityNode) -> Result<EntityNode> {
        if node.uuid.trim().is_empty() {
            return Err(GraphError::Validation("entity uuid must not be blank".into()));
        }
        if node.name.trim().is_empty() {
            return Err(GraphError::Validation("entity name must not be blank".into()));
        }

        let mut data = self.data.write().await;
        let created_at = data
            .entities
            .get(&node.uuid)
            .map(|existing| existing.created_at)
            .unwrap_or_else(Utc::now);
        let stored = EntityNode {
            uuid: node.uuid,
            name: node.name,
            group_id: node.group_id,
            labels: vec![ENTITY_LABEL.to_string()],
            summary: node.summary,
            attributes: serde_json::Value::Object(Default::default()),
            created_at,
        };
        data.entities.insert(stored.uuid.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete_entity_edge(&self, uuid: &str) -> Result<()> {
        match self.data.write().await.edges.remove(uuid) {
            Some(_) => Ok(()),
            None => Err(GraphError::EdgeNotFound(uuid.to_string())),
        }
    }

    async fn delete_group(&self, group_id: &str) -> Result<()> {
        let mut data = self.data.write().await;
        let before = data.episodes.len() + data.entities.len() + data.edges.len();
        data.episodes.retain(|_, e| e.group_id != group_id);
        data.entities.retain(|_, n| n.group_id != group_id);
        data.edges.retain(|_, e| e.group_id != group_id);
        let after = data.episodes.len() + data.entities.len() + data.edges.len();
        info!(group_id, removed = before - after, "deleted group");
        Ok(())
    }

    async fn delete_episodic_node(&self, uuid: &str) -> Result<()> {
        let mut data = self.data.write().await;
        if data.episodes.remove(uuid).is_none() {
            return Err(GraphError::NodeNotFound(uuid.to_string()));
        }
        // Facts only supported by this episode go with it.
        data.edges.retain(|_, edge| {
            let mentioned = edge.episodes.iter().any(|e| e == uuid);
            !(mentioned && edge.episodes.len() == 1)
        });
        for edge in data.edges.values_mut() {
            edge.episodes.retain(|e| e != uuid);
        }
        Ok(())
    }

    async fn clear_data(&self) -> Result<()> {
        let mut data = self.data.write().await;
        data.episodes.clear();
        data.entities.clear();
        data.edges.clear();
        info!("cleared all graph data");
        Ok(())
    }

    async fn build_indices_and_constraints(&self) -> Result<()> {
        self.data.write().await.indices_built = true;
        debug!("indices and constraints ready");
        Ok(())
    }
}
