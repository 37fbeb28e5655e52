use graphsvc_graph::NewEntityNode;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationIssue;

#[derive(Debug, Deserialize, Serialize)]
pub struct AddEntityNodeRequest {
    pub uuid: String,
    pub group_id: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

impl AddEntityNodeRequest {
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let mut issues: Vec<ValidationIssue> = Vec::new();
        if self.uuid.trim().is_empty() {
            issues.push(ValidationIssue::blank("uuid"));
        }
        if self.group_id.trim().is_empty() {
            issues.push(ValidationIssue::blank("group_id"));
        }
        if self.name.trim().is_empty() {
            issues.push(ValidationIssue::blank("name"));
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

impl From<AddEntityNodeRequest> for NewEntityNode {
    fn from(request: AddEntityNodeRequest) -> Self {
        NewEntityNode {
            uuid: request.uuid,
            group_id: request.group_id,
            name: request.name,
            summary: request.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_defaults_to_empty() {
        let request: AddEntityNodeRequest =
            serde_json::from_str(r#"{"uuid":"n-1","group_id":"g1","name":"Alice"}"#).unwrap();
        assert_eq!(request.summary, "");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn every_blank_field_is_reported() {
        let request = AddEntityNodeRequest {
            uuid: "".into(),
            group_id: " ".into(),
            name: "".into(),
            summary: "s".into(),
        };
        let fields: Vec<String> = request
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|issue| issue.field)
            .collect();
        assert_eq!(fields, vec!["uuid", "group_id", "name"]);
    }
}
