//! Graph primitives exchanged with the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an episode's body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeType {
    Message,
    Json,
    Text,
}

impl std::fmt::Display for EpisodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Message => "message",
            Self::Json => "json",
            Self::Text => "text",
        })
    }
}

/// Parameters of one `add_episode` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddEpisode {
    /// Caller-chosen id; the store generates one when absent.
    pub uuid: Option<String>,
    pub group_id: String,
    pub name: String,
    pub episode_body: String,
    pub reference_time: DateTime<Utc>,
    pub source: EpisodeType,
    pub source_description: String,
}

/// An ingested episode as stored in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodicNode {
    pub uuid: String,
    pub name: String,
    pub group_id: String,
    pub source: EpisodeType,
    pub source_description: String,
    pub content: String,
    pub valid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Parameters of one `save_entity_node` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntityNode {
    pub uuid: String,
    pub group_id: String,
    pub name: String,
    pub summary: String,
}

/// A real-world entity (person, place, concept).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityNode {
    pub uuid: String,
    pub name: String,
    pub group_id: String,
    pub labels: Vec<String>,
    pub summary: String,
    pub attributes: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// A factual relationship between two entity nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEdge {
    pub uuid: String,
    pub group_id: String,
    pub source_node_uuid: String,
    pub target_node_uuid: String,
    /// Relationship label (e.g. "KNOWS", "WORKS_AT").
    pub name: String,
    pub fact: String,
    /// Episodes this fact was extracted from.
    pub episodes: Vec<String>,
    pub created_at: DateTime<Utc>,
}
