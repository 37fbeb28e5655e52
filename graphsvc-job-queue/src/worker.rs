//! Background worker: one long-lived task draining the [`WorkQueue`] one job at a time.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::JobQueueError;
use crate::executor::{JobExecutor, QueuedJob};
use crate::history::RunHistory;
use crate::queue::WorkQueue;
use crate::types::{EnqueueResult, JobRun, StopReport, WorkerState, WorkerStats};

/// A job together with the id it was given at enqueue time.
struct Envelope<J> {
    id: Uuid,
    job: J,
}

/// State shared between the [`AsyncWorker`] handle and its loop task.
struct Shared<J: QueuedJob> {
    queue: WorkQueue<Envelope<J>>,
    executor: Arc<dyn JobExecutor<J>>,
    history: RwLock<RunHistory>,
    completed: AtomicU64,
    failed: AtomicU64,
    processing: AtomicBool,
}

impl<J: QueuedJob> Shared<J> {
    async fn run(self: Arc<Self>, cancel: CancellationToken) {
        info!("job worker started");
        loop {
            debug!(pending = self.queue.len(), "waiting for next job");
            let envelope = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("job worker cancelled");
                    break;
                }
                envelope = self.queue.dequeue() => envelope,
            };
            self.process(envelope).await;
        }
    }

    async fn process(&self, envelope: Envelope<J>) {
        let Envelope { id, job } = envelope;
        let job_type = job.job_type();
        let job_key = job.job_key();

        self.processing.store(true, Ordering::SeqCst);
        self.with_history(|h| h.record(JobRun::started(id, job_type, job_key.clone())));
        info!(
            job_id = %id,
            job_type,
            job_key = %job_key,
            pending = self.queue.len(),
            "processing job"
        );

        let outcome = AssertUnwindSafe(self.executor.execute(job))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(JobQueueError::Panicked(panic_message(panic.as_ref()))));

        match outcome {
            Ok(()) => {
                self.with_history(|h| h.update(id, JobRun::complete));
                self.completed.fetch_add(1, Ordering::SeqCst);
                info!(job_id = %id, job_type, job_key = %job_key, "job completed successfully");
            }
            Err(e) => {
                error!(
                    job_id = %id,
                    job_type,
                    job_key = %job_key,
                    error = %e,
                    "error processing job"
                );
                self.with_history(|h| h.update(id, |run| run.fail(e.to_string())));
                self.failed.fetch_add(1, Ordering::SeqCst);
            }
        }
        self.processing.store(false, Ordering::SeqCst);
    }

    fn with_history<T>(&self, f: impl FnOnce(&mut RunHistory) -> T) -> T {
        let mut guard = self.history.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    fn read_history<T>(&self, f: impl FnOnce(&RunHistory) -> T) -> T {
        let guard = self.history.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

enum LoopSlot {
    Stopped,
    Running {
        cancel: CancellationToken,
        task: JoinHandle<()>,
    },
    /// `stop()` has cancelled the loop and holds its join handle.
    Stopping,
}

/// Puts the slot back to `Stopped` when `stop()` finishes or is dropped mid-join.
struct StoppingGuard<'a>(&'a Mutex<LoopSlot>);

impl Drop for StoppingGuard<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = LoopSlot::Stopped;
    }
}

/// Owns the work queue and the background task that executes it.
///
/// Meant to be started once when the process boots and stopped once when it
/// shuts down. Jobs may be enqueued at any time; they only run while the loop
/// is started.
pub struct AsyncWorker<J: QueuedJob> {
    shared: Arc<Shared<J>>,
    slot: Mutex<LoopSlot>,
    /// Serializes `stop()` calls so a second one returns only after the loop has exited.
    stopping: tokio::sync::Mutex<()>,
    grace_period: Option<Duration>,
}

impl<J: QueuedJob> fmt::Debug for AsyncWorker<J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncWorker")
            .field("pending", &self.shared.queue.len())
            .field("running", &self.is_running())
            .field("grace_period", &self.grace_period)
            .finish()
    }
}

impl<J: QueuedJob> AsyncWorker<J> {
    /// Create a stopped worker. `stop()` waits for an in-flight job without limit.
    pub fn new(executor: Arc<dyn JobExecutor<J>>) -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: WorkQueue::new(),
                executor,
                history: RwLock::new(RunHistory::default()),
                completed: AtomicU64::new(0),
                failed: AtomicU64::new(0),
                processing: AtomicBool::new(false),
            }),
            slot: Mutex::new(LoopSlot::Stopped),
            stopping: tokio::sync::Mutex::new(()),
            grace_period: None,
        }
    }

    /// Bound how long `stop()` waits for an in-flight job before aborting it.
    ///
    /// `None` and a zero duration both wait without limit.
    pub fn with_grace_period(mut self, grace_period: Option<Duration>) -> Self {
        self.grace_period = grace_period.filter(|grace| !grace.is_zero());
        self
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, LoopSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawn the worker loop. Returns once the task is scheduled.
    ///
    /// Calling this while the loop is running, or while `stop()` is still
    /// waiting for it to exit, does nothing.
    pub fn start(&self) {
        let mut slot = self.slot();
        match &*slot {
            LoopSlot::Running { task, .. } if !task.is_finished() => {
                warn!("job worker already running, ignoring start");
                return;
            }
            LoopSlot::Stopping => {
                warn!("job worker is stopping, ignoring start");
                return;
            }
            _ => {}
        }

        info!(pending = self.shared.queue.len(), "starting job worker");
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.shared.clone().run(cancel.clone()));
        *slot = LoopSlot::Running { cancel, task };
    }

    /// Cancel the loop, wait for it to terminate, then discard every queued job.
    ///
    /// A job already executing is allowed to finish. With a grace period set,
    /// a job still running when it expires is aborted.
    pub async fn stop(&self) -> StopReport {
        let _serialized = self.stopping.lock().await;
        info!("stopping job worker");
        let mut report = StopReport::default();

        let running = {
            let mut slot = self.slot();
            match std::mem::replace(&mut *slot, LoopSlot::Stopped) {
                LoopSlot::Running { cancel, task } => {
                    *slot = LoopSlot::Stopping;
                    Some((cancel, task))
                }
                _ => None,
            }
        };

        // Held until the queue is drained so `start()` keeps refusing meanwhile.
        let _reset = running.as_ref().map(|_| StoppingGuard(&self.slot));
        if let Some((cancel, mut task)) = running {
            cancel.cancel();

            let joined = match self.grace_period {
                Some(grace) => tokio::time::timeout(grace, &mut task).await.ok(),
                None => Some((&mut task).await),
            };

            match joined {
                Some(Ok(())) => {}
                Some(Err(e)) if e.is_cancelled() => {}
                Some(Err(e)) => error!(error = %e, "job worker task terminated abnormally"),
                None => {
                    warn!(
                        grace_ms = self.grace_period.map(|g| g.as_millis() as u64),
                        "in-flight job exceeded shutdown grace period, aborting worker"
                    );
                    task.abort();
                    if let Err(e) = task.await {
                        if !e.is_cancelled() {
                            error!(error = %e, "job worker task terminated abnormally");
                        }
                    }
                    let interrupted = self
                        .shared
                        .with_history(|h| h.fail_running("aborted during shutdown"));
                    debug!(interrupted, "marked interrupted runs as failed");
                    self.shared.processing.store(false, Ordering::SeqCst);
                    report.aborted = true;
                }
            }
        }

        report.drained = self.shared.queue.drain();
        if report.drained > 0 {
            warn!(drained = report.drained, "discarded unprocessed jobs on shutdown");
        }
        info!("job worker stopped");
        report
    }

    /// Append a job to the queue. Never waits and never fails.
    pub fn enqueue(&self, job: J) -> EnqueueResult {
        let job_id = Uuid::new_v4();
        debug!(
            job_id = %job_id,
            job_type = job.job_type(),
            job_key = %job.job_key(),
            "enqueuing job"
        );
        self.shared.queue.enqueue(Envelope { id: job_id, job });
        EnqueueResult {
            job_id,
            pending: self.shared.queue.len(),
        }
    }

    /// Whether the loop task is alive. True while `stop()` is still waiting for it.
    pub fn is_running(&self) -> bool {
        match &*self.slot() {
            LoopSlot::Running { task, .. } => !task.is_finished(),
            LoopSlot::Stopping => true,
            LoopSlot::Stopped => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn stats(&self) -> WorkerStats {
        let state = if self.shared.processing.load(Ordering::SeqCst) {
            WorkerState::Processing
        } else {
            WorkerState::Idle
        };
        WorkerStats {
            pending: self.shared.queue.len(),
            completed: self.shared.completed.load(Ordering::SeqCst),
            failed: self.shared.failed.load(Ordering::SeqCst),
            state,
            running: self.is_running(),
        }
    }

    /// Most recent job runs, newest first.
    pub fn recent_runs(&self, limit: usize) -> Vec<JobRun> {
        self.shared
            .read_history(|h| h.recent(limit))
    }

    /// Look up the run record of an enqueued job once the loop has picked it up.
    pub fn get_run(&self, id: Uuid) -> Option<JobRun> {
        self.shared.read_history(|h| h.find(id).cloned())
    }
}

impl<J: QueuedJob> Drop for AsyncWorker<J> {
    fn drop(&mut self) {
        if let LoopSlot::Running { cancel, .. } = &*self.slot() {
            cancel.cancel();
        }
    }
}
