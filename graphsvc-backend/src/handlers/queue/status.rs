use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query};
use axum::Json;
use serde_json::{json, Value};

use crate::handlers::utils::parse_positive_usize;
use crate::{error::ApiError, state::AppState};

/// GET /queue/status
/// Worker counters plus the most recent job runs, newest first.
pub async fn status(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = query.ok().map(|value| value.0).unwrap_or_default();
    let limit = parse_positive_usize(params.get("limit"), 20, "limit")?;

    let stats = state.worker.stats();
    let runs: Vec<Value> = state
        .worker
        .recent_runs(limit)
        .into_iter()
        .map(|run| {
            json!({
                "id": run.id,
                "jobName": run.job_name,
                "jobKey": run.job_key,
                "status": run.status.to_string(),
                "startedAt": run.started_at.to_rfc3339(),
                "finishedAt": run.finished_at.map(|dt| dt.to_rfc3339()),
                "errorMessage": run.error_message,
            })
        })
        .collect();

    Ok(Json(json!({
        "pending": stats.pending,
        "completed": stats.completed,
        "failed": stats.failed,
        "state": stats.state.to_string(),
        "running": stats.running,
        "recentRuns": runs,
    })))
}
