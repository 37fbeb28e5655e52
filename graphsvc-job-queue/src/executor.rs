//! Job and executor traits.

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::error::JobQueueError;

/// A unit of work that can sit in the [`WorkQueue`](crate::WorkQueue).
///
/// Jobs are plain data. The worker never inspects the payload beyond the two
/// descriptors below, which it attaches to its log events and run records.
pub trait QueuedJob: Debug + Send + 'static {
    /// Stable name of the operation, e.g. `"episode.add"`.
    fn job_type(&self) -> &'static str;

    /// Identifier of the thing being mutated (message uuid, node uuid, ...).
    fn job_key(&self) -> String;
}

/// Trait for implementing job executors.
///
/// The worker loop hands every dequeued job to exactly one executor call.
/// Returning an error marks the job as failed; it is never retried.
#[async_trait]
pub trait JobExecutor<J: QueuedJob>: Send + Sync {
    async fn execute(&self, job: J) -> Result<(), JobQueueError>;
}

/// An executor that completes every job without doing anything.
#[derive(Debug)]
pub struct NoOpExecutor<J> {
    _job: PhantomData<fn(J)>,
}

impl<J> Default for NoOpExecutor<J> {
    fn default() -> Self {
        Self { _job: PhantomData }
    }
}

impl<J> NoOpExecutor<J> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<J: QueuedJob> JobExecutor<J> for NoOpExecutor<J> {
    async fn execute(&self, _job: J) -> Result<(), JobQueueError> {
        Ok(())
    }
}
