use std::fmt;

use chrono::{DateTime, Utc};
use graphsvc_jobs::EpisodeJob;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationIssue;

/// Speaker category attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    User,
    Assistant,
    System,
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub content: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: String,
    pub role_type: RoleType,
    /// Display name of the speaker, e.g. a user's handle.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub source_description: String,
}

impl Message {
    pub fn into_job(self, group_id: &str) -> EpisodeJob {
        EpisodeJob {
            uuid: self.uuid,
            group_id: group_id.to_string(),
            name: self.name,
            role: self.role,
            role_type: self.role_type.to_string(),
            content: self.content,
            source_description: self.source_description,
            timestamp: self.timestamp,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AddMessagesRequest {
    pub group_id: String,
    pub messages: Vec<Message>,
}

impl AddMessagesRequest {
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let mut issues: Vec<ValidationIssue> = Vec::new();
        if self.group_id.trim().is_empty() {
            issues.push(ValidationIssue::blank("group_id"));
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_defaults_fill_optional_fields() {
        let before = Utc::now();
        let message: Message =
            serde_json::from_str(r#"{"content":"hi","role_type":"assistant"}"#).unwrap();
        assert_eq!(message.role_type, RoleType::Assistant);
        assert_eq!(message.name, "");
        assert_eq!(message.source_description, "");
        assert!(message.uuid.is_none());
        assert!(message.role.is_none());
        assert!(message.timestamp >= before);
    }

    #[test]
    fn unknown_role_type_is_rejected() {
        let parsed = serde_json::from_str::<Message>(r#"{"content":"hi","role_type":"robot"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn message_becomes_episode_job_for_group() {
        let message: Message = serde_json::from_str(
            r#"{
                "content": "hello",
                "uuid": "m-1",
                "name": "greeting",
                "role_type": "user",
                "role": "alice",
                "timestamp": "2024-05-01T10:00:00Z",
                "source_description": "slack"
            }"#,
        )
        .unwrap();
        let job = message.into_job("g1");
        assert_eq!(job.group_id, "g1");
        assert_eq!(job.uuid.as_deref(), Some("m-1"));
        assert_eq!(job.role_type, "user");
        assert_eq!(job.episode_body(), "alice(user): hello");
        assert_eq!(job.timestamp.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn blank_group_id_fails_validation() {
        let request = AddMessagesRequest {
            group_id: "   ".into(),
            messages: Vec::new(),
        };
        let issues = request.validate().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "group_id");
    }
}
