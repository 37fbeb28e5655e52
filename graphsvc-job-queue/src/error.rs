//! Error types for the job queue system.

use thiserror::Error;

/// Errors that may occur while executing queued jobs.
#[derive(Debug, Error)]
pub enum JobQueueError {
    #[error("job execution failed: {0}")]
    ExecutionFailed(String),

    #[error("job panicked: {0}")]
    Panicked(String),

    #[error("invalid job: {0}")]
    InvalidJob(String),
}
