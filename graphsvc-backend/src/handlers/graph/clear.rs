use std::sync::Arc;

use axum::extract::{Extension, Json};
use tracing::{info, warn};

use crate::handlers::dto::OperationResult;
use crate::{error::ApiError, state::AppState};

/// POST /clear
/// Wipe the graph, then rebuild indices and constraints. Responds only after both finish.
pub async fn clear(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<OperationResult>, ApiError> {
    let pending = state.worker.pending();
    if pending > 0 {
        warn!(pending, "clearing graph while messages are still queued");
    }

    state.graph.clear_data().await?;
    state.graph.build_indices_and_constraints().await?;
    info!("graph cleared");

    Ok(Json(OperationResult::ok("Graph cleared")))
}
