use std::sync::Arc;

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use graphsvc_jobs::IngestJob;
use tracing::{debug, info};

use super::dto::AddMessagesRequest;
use crate::handlers::dto::OperationResult;
use crate::validation::to_payload;
use crate::{error::ApiError, state::AppState};

/// POST /messages
/// Queue one episode job per message and acknowledge before any is applied.
pub async fn add_messages(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<AddMessagesRequest>,
) -> Result<(StatusCode, Json<OperationResult>), ApiError> {
    if let Err(issues) = request.validate() {
        return Err(ApiError::Validation(to_payload(&issues)));
    }

    let AddMessagesRequest { group_id, messages } = request;
    let count = messages.len();
    for message in messages {
        let job = IngestJob::AddEpisode(message.into_job(&group_id));
        let queued = state.worker.enqueue(job);
        debug!(job_id = %queued.job_id, pending = queued.pending, "message queued");
    }

    info!(group_id = %group_id, count, "messages added to processing queue");

    Ok((
        StatusCode::ACCEPTED,
        Json(OperationResult::ok("Messages added to processing queue")),
    ))
}
