use std::sync::Arc;

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use graphsvc_graph::EntityNode;
use tracing::info;

use super::dto::AddEntityNodeRequest;
use crate::validation::to_payload;
use crate::{error::ApiError, state::AppState};

/// POST /entity-node
/// Save an entity node directly in the graph store and return it.
pub async fn create(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<AddEntityNodeRequest>,
) -> Result<(StatusCode, Json<EntityNode>), ApiError> {
    if let Err(issues) = request.validate() {
        return Err(ApiError::Validation(to_payload(&issues)));
    }

    let node = state.graph.save_entity_node(request.into()).await?;
    info!(uuid = %node.uuid, group_id = %node.group_id, "entity node saved");

    Ok((StatusCode::CREATED, Json(node)))
}
