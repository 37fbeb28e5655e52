use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use tracing::info;

use crate::handlers::dto::OperationResult;
use crate::handlers::utils::path_param;
use crate::{error::ApiError, state::AppState};

/// DELETE /group/{group_id}
/// Remove every node and edge in the group. Unknown groups succeed.
pub async fn delete(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<OperationResult>, ApiError> {
    let group_id = path_param(&path, "group_id")?;

    state.graph.delete_group(group_id).await?;
    info!(group_id = %group_id, "group deleted");

    Ok(Json(OperationResult::ok("Group deleted")))
}
