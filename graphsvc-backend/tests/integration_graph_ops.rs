mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use graphsvc_backend::build_router;
use graphsvc_graph::InMemoryGraph;
use serde_json::json;

use common::{send, test_state, wait_until, GraphCall, RecordingGraph};

#[tokio::test]
async fn entity_node_is_saved_and_returned() {
    let graph = RecordingGraph::new();
    let state = test_state(graph.clone());

    let (status, body) = send(
        build_router(state),
        Method::POST,
        "/entity-node",
        Some(json!({ "uuid": "n-1", "group_id": "g1", "name": "Alice" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["uuid"], "n-1");
    assert_eq!(body["group_id"], "g1");
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["summary"], "");
    assert_eq!(graph.calls(), vec![GraphCall::SaveEntityNode("n-1".into())]);
}

#[tokio::test]
async fn entity_node_with_blank_fields_is_rejected() {
    let graph = RecordingGraph::new();
    let state = test_state(graph.clone());

    let (status, body) = send(
        build_router(state),
        Method::POST,
        "/entity-node",
        Some(json!({ "uuid": "", "group_id": "g1", "name": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["validation"]["uuid"]["code"], "blank");
    assert_eq!(body["validation"]["name"]["code"], "blank");
    assert!(graph.calls().is_empty());
}

#[tokio::test]
async fn deletes_report_success() {
    let graph = RecordingGraph::new();
    let state = test_state(graph.clone());

    let cases = [
        ("/entity-edge/e-1", "Entity Edge deleted"),
        ("/group/g1", "Group deleted"),
        ("/episode/ep-1", "Episode deleted"),
    ];
    for (uri, message) in cases {
        let (status, body) = send(build_router(state.clone()), Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!({ "message": message, "success": true }));
    }

    assert_eq!(
        graph.calls(),
        vec![
            GraphCall::DeleteEntityEdge("e-1".into()),
            GraphCall::DeleteGroup("g1".into()),
            GraphCall::DeleteEpisode("ep-1".into()),
        ]
    );
}

#[tokio::test]
async fn deleting_unknown_items_is_not_found() {
    let state = test_state(RecordingGraph::new());

    for uri in ["/entity-edge/missing-edge", "/episode/missing-episode"] {
        let (status, body) = send(build_router(state.clone()), Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].as_str().unwrap().contains("missing-"));
    }
}

#[tokio::test]
async fn clear_wipes_then_rebuilds_indices() {
    let graph = RecordingGraph::new();
    let state = test_state(graph.clone());

    let (status, body) = send(build_router(state), Method::POST, "/clear", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Graph cleared", "success": true }));
    assert_eq!(graph.calls(), vec![GraphCall::ClearData, GraphCall::BuildIndices]);
}

#[tokio::test]
async fn clear_failure_is_propagated() {
    let graph = RecordingGraph::new();
    graph.fail_clear();
    let state = test_state(graph.clone());

    let (status, body) = send(build_router(state), Method::POST, "/clear", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("connection reset"));
    assert_eq!(graph.calls(), vec![GraphCall::ClearData]);
}

#[tokio::test]
async fn healthcheck_and_unknown_routes() {
    let state = test_state(RecordingGraph::new());

    let (status, body) = send(build_router(state.clone()), Method::GET, "/healthcheck", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));

    let (status, body) = send(build_router(state), Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("/nope"));
}

#[tokio::test]
async fn in_memory_graph_round_trip() {
    let graph = Arc::new(InMemoryGraph::new());
    let state = test_state(graph.clone());
    state.worker.start();

    let (status, _) = send(
        build_router(state.clone()),
        Method::POST,
        "/messages",
        Some(json!({
            "group_id": "g1",
            "messages": [{ "content": "hello", "uuid": "m-1", "role_type": "user" }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    wait_until(|| state.worker.stats().completed == 1).await;

    let episode = graph.episode("m-1").await.expect("episode stored");
    assert_eq!(episode.content, "(user): hello");

    let (status, _) = send(build_router(state.clone()), Method::DELETE, "/episode/m-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(graph.episode("m-1").await.is_none());

    let (status, _) = send(build_router(state.clone()), Method::DELETE, "/episode/m-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    state.worker.stop().await;
}
