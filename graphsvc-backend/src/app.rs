use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::Uri,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Request bodies larger than this are rejected before reaching a handler.
const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthcheck", get(handlers::health::healthcheck))
        // Ingestion (queued)
        .route("/messages", post(handlers::messages::add::add_messages))
        // Graph mutations (synchronous)
        .route("/entity-node", post(handlers::entity_nodes::create::create))
        .route(
            "/entity-edge/{uuid}",
            delete(handlers::entity_edges::delete::delete),
        )
        .route("/group/{group_id}", delete(handlers::groups::delete::delete))
        .route("/episode/{uuid}", delete(handlers::episodes::delete::delete))
        .route("/clear", post(handlers::graph::clear::clear))
        // Diagnostics
        .route("/queue/status", get(handlers::queue::status::status))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("no route for {}", uri.path()))
}
