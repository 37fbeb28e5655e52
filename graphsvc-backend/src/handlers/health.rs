use axum::Json;
use serde_json::{json, Value};

/// GET /healthcheck
/// Liveness probe. Does not touch the graph store or the worker.
pub async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
