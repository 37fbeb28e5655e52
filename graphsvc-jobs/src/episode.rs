//! Episode ingestion job.

use chrono::{DateTime, Utc};
use graphsvc_graph::{AddEpisode, EpisodeType};
use serde::{Deserialize, Serialize};

/// One conversational message waiting to be added to the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeJob {
    pub uuid: Option<String>,
    pub group_id: String,
    pub name: String,
    pub role: Option<String>,
    pub role_type: String,
    pub content: String,
    pub source_description: String,
    pub timestamp: DateTime<Utc>,
}

impl EpisodeJob {
    /// Body stored for the episode: `role(role_type): content`.
    pub fn episode_body(&self) -> String {
        format!(
            "{}({}): {}",
            self.role.as_deref().unwrap_or(""),
            self.role_type,
            self.content
        )
    }

    pub fn into_add_episode(self) -> AddEpisode {
        let episode_body = self.episode_body();
        AddEpisode {
            uuid: self.uuid,
            group_id: self.group_id,
            name: self.name,
            episode_body,
            reference_time: self.timestamp,
            source: EpisodeType::Message,
            source_description: self.source_description,
        }
    }
}
