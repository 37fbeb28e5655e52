use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use tracing::info;

use crate::handlers::dto::OperationResult;
use crate::handlers::utils::path_param;
use crate::{error::ApiError, state::AppState};

/// DELETE /entity-edge/{uuid}
pub async fn delete(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<OperationResult>, ApiError> {
    let uuid = path_param(&path, "uuid")?;

    state.graph.delete_entity_edge(uuid).await?;
    info!(uuid = %uuid, "entity edge deleted");

    Ok(Json(OperationResult::ok("Entity Edge deleted")))
}
