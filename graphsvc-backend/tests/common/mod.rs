#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use graphsvc_backend::state::AppState;
use graphsvc_graph::{AddEpisode, EntityNode, GraphClient, GraphError, NewEntityNode};
use serde_json::{json, Value};
use tower::ServiceExt;

/// One call observed by [`RecordingGraph`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphCall {
    Ping,
    AddEpisode { name: String, group_id: String, body: String },
    SaveEntityNode(String),
    DeleteEntityEdge(String),
    DeleteGroup(String),
    DeleteEpisode(String),
    ClearData,
    BuildIndices,
}

/// Graph client that records every call in order.
///
/// Episodes named `fail*` error out; uuids starting with `missing` are not found.
#[derive(Default)]
pub struct RecordingGraph {
    calls: Mutex<Vec<GraphCall>>,
    failing_names: Mutex<HashSet<String>>,
    fail_clear: AtomicBool,
}

impl RecordingGraph {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<GraphCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn episode_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GraphCall::AddEpisode { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn fail_clear(&self) {
        self.fail_clear.store(true, Ordering::SeqCst);
    }

    pub fn fail_episode(&self, name: &str) {
        self.failing_names.lock().unwrap().insert(name.to_string());
    }

    fn record(&self, call: GraphCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GraphClient for RecordingGraph {
    async fn ping(&self) -> graphsvc_graph::Result<()> {
        self.record(GraphCall::Ping);
        Ok(())
    }

    async fn add_episode(&self, episode: AddEpisode) -> graphsvc_graph::Result<()> {
        let failing = self.failing_names.lock().unwrap().contains(&episode.name);
        self.record(GraphCall::AddEpisode {
            name: episode.name,
            group_id: episode.group_id,
            body: episode.episode_body,
        });
        if failing {
            return Err(GraphError::Driver("episode rejected".into()));
        }
        Ok(())
    }

    async fn save_entity_node(&self, node: NewEntityNode) -> graphsvc_graph::Result<EntityNode> {
        self.record(GraphCall::SaveEntityNode(node.uuid.clone()));
        Ok(EntityNode {
            uuid: node.uuid,
            name: node.name,
            group_id: node.group_id,
            labels: vec!["Entity".into()],
            summary: node.summary,
            attributes: json!({}),
            created_at: Utc::now(),
        })
    }

    async fn delete_entity_edge(&self, uuid: &str) -> graphsvc_graph::Result<()> {
        self.record(GraphCall::DeleteEntityEdge(uuid.to_string()));
        if uuid.starts_with("missing") {
            return Err(GraphError::EdgeNotFound(uuid.to_string()));
        }
        Ok(())
    }

    async fn delete_group(&self, group_id: &str) -> graphsvc_graph::Result<()> {
        self.record(GraphCall::DeleteGroup(group_id.to_string()));
        Ok(())
    }

    async fn delete_episodic_node(&self, uuid: &str) -> graphsvc_graph::Result<()> {
        self.record(GraphCall::DeleteEpisode(uuid.to_string()));
        if uuid.starts_with("missing") {
            return Err(GraphError::NodeNotFound(uuid.to_string()));
        }
        Ok(())
    }

    async fn clear_data(&self) -> graphsvc_graph::Result<()> {
        self.record(GraphCall::ClearData);
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(GraphError::Driver("connection reset".into()));
        }
        Ok(())
    }

    async fn build_indices_and_constraints(&self) -> graphsvc_graph::Result<()> {
        self.record(GraphCall::BuildIndices);
        Ok(())
    }
}

pub fn test_state(graph: Arc<dyn GraphClient>) -> Arc<AppState> {
    Arc::new(AppState::with_graph(graph))
}

/// Drive one request through the router and decode the JSON body (Null when empty).
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = router
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Poll `condition` until it holds, panicking after a few seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not met in time");
}

pub fn message(name: &str, content: &str) -> Value {
    json!({
        "content": content,
        "name": name,
        "role_type": "user",
        "role": "alice",
    })
}
