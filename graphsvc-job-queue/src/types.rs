//! Core types for the job queue system.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result returned after a job has been enqueued.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnqueueResult {
    pub job_id: Uuid,
    /// Queue depth right after this job was appended.
    pub pending: usize,
}

/// Status of a job run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Returns true if this status represents a terminal state.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        })
    }
}

/// A record of one job execution by the worker loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRun {
    pub id: Uuid,
    pub job_name: String,
    pub job_key: String,
    pub status: JobStatus,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    pub error_message: Option<String>,
}

impl JobRun {
    /// Create a run that has just started executing.
    #[inline]
    pub fn started(id: Uuid, job_name: impl Into<String>, job_key: impl Into<String>) -> Self {
        Self {
            id,
            job_name: job_name.into(),
            job_key: job_key.into(),
            status: JobStatus::Running,
            started_at: chrono::Utc::now(),
            finished_at: None,
            error_message: None,
        }
    }

    /// Mark the job as completed.
    #[inline]
    pub fn complete(&mut self) {
        self.status = JobStatus::Completed;
        self.finished_at = Some(chrono::Utc::now());
    }

    /// Mark the job as failed with an error message.
    #[inline]
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.finished_at = Some(chrono::Utc::now());
        self.error_message = Some(message.into());
    }
}

/// What the worker loop is doing right now.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkerState {
    /// Waiting for the next job (or not started).
    Idle,
    /// Executing a job.
    Processing,
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
        })
    }
}

/// Point-in-time counters for diagnostics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerStats {
    pub pending: usize,
    pub completed: u64,
    pub failed: u64,
    pub state: WorkerState,
    pub running: bool,
}

/// Outcome of [`AsyncWorker::stop`](crate::AsyncWorker::stop).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopReport {
    /// Jobs discarded from the queue without being executed.
    pub drained: usize,
    /// The loop was still busy when the grace period ran out and had to be aborted.
    pub aborted: bool,
}
