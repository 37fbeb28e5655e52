//! In-process job queue that serializes graph mutations.
//!
//! Many request handlers enqueue jobs concurrently; a single background loop
//! executes them one at a time, in insertion order. A failing job is logged
//! and discarded without affecting the jobs behind it. Nothing is persisted:
//! jobs still queued when the worker stops are dropped.
//!
//! # Architecture
//!
//! - [`WorkQueue`] - Unbounded FIFO with a waiting consumer
//! - [`AsyncWorker`] - Owns the queue and the loop task; `start` / `stop`
//! - [`JobExecutor`] - Trait for the code that actually runs a job
//! - [`QueuedJob`] - Descriptors every job exposes for logging
//! - [`JobRun`] - A record of one execution
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use graphsvc_job_queue::{async_trait, AsyncWorker, JobExecutor, JobQueueError, QueuedJob};
//!
//! #[derive(Debug)]
//! struct Greet(String);
//!
//! impl QueuedJob for Greet {
//!     fn job_type(&self) -> &'static str {
//!         "greet"
//!     }
//!
//!     fn job_key(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! struct GreetExecutor;
//!
//! #[async_trait]
//! impl JobExecutor<Greet> for GreetExecutor {
//!     async fn execute(&self, job: Greet) -> Result<(), JobQueueError> {
//!         println!("hello, {}", job.0);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let worker = AsyncWorker::new(Arc::new(GreetExecutor));
//!     worker.start();
//!     worker.enqueue(Greet("graph".into()));
//!     worker.stop().await;
//! }
//! ```

mod error;
mod executor;
mod history;
mod queue;
mod types;
mod worker;

pub use error::JobQueueError;
pub use executor::{JobExecutor, NoOpExecutor, QueuedJob};
pub use queue::WorkQueue;
pub use types::{EnqueueResult, JobRun, JobStatus, StopReport, WorkerState, WorkerStats};
pub use worker::AsyncWorker;

// Re-export async_trait for convenience when implementing JobExecutor
pub use async_trait::async_trait;
