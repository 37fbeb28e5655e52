use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use tracing::info;

use crate::handlers::dto::OperationResult;
use crate::handlers::utils::path_param;
use crate::{error::ApiError, state::AppState};

/// DELETE /episode/{uuid}
pub async fn delete(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<OperationResult>, ApiError> {
    let uuid = path_param(&path, "uuid")?;

    state.graph.delete_episodic_node(uuid).await?;
    info!(uuid = %uuid, "episode deleted");

    Ok(Json(OperationResult::ok("Episode deleted")))
}
