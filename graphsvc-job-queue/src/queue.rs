//! Unbounded FIFO work queue with a single waiting consumer.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

/// Ordered queue of pending jobs.
///
/// Producers never wait: [`enqueue`](Self::enqueue) appends and wakes the
/// consumer. Insertion order is execution order; nothing is reordered or
/// deduplicated.
pub struct WorkQueue<J> {
    jobs: Mutex<VecDeque<J>>,
    available: Notify,
}

impl<J> fmt::Debug for WorkQueue<J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkQueue")
            .field("pending", &self.len())
            .finish()
    }
}

impl<J> Default for WorkQueue<J> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J> WorkQueue<J> {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(VecDeque::new()),
            available: Notify::new(),
        }
    }

    // Critical sections never panic, so a poisoned lock still holds a valid deque.
    fn lock(&self) -> MutexGuard<'_, VecDeque<J>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a job to the tail of the queue.
    pub fn enqueue(&self, job: J) {
        self.lock().push_back(job);
        self.available.notify_one();
    }

    /// Wait until a job is available, then remove and return the head.
    ///
    /// Cancel safe: dropping the returned future never loses a job.
    pub async fn dequeue(&self) -> J {
        loop {
            let next = self.lock().pop_front();
            if let Some(job) = next {
                return job;
            }
            // A notify_one issued between the check above and this await leaves
            // a stored permit, so the wakeup is not missed.
            self.available.notified().await;
        }
    }

    /// Remove the head without waiting.
    pub fn try_dequeue(&self) -> Option<J> {
        self.lock().pop_front()
    }

    /// Discard every pending job without running it. Returns how many were dropped.
    pub fn drain(&self) -> usize {
        let mut jobs = self.lock();
        let dropped = jobs.len();
        jobs.clear();
        dropped
    }

    /// Number of pending jobs.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn dequeues_in_insertion_order() {
        let queue = WorkQueue::new();
        for i in 0..5 {
            queue.enqueue(i);
        }
        assert_eq!(queue.len(), 5);

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(queue.dequeue().await);
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn dequeue_waits_for_producer() {
        let queue = Arc::new(WorkQueue::new());

        let consumer = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.dequeue().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!consumer.is_finished());

        queue.enqueue("hello");
        let got = tokio::time::timeout(Duration::from_secs(1), consumer)
            .await
            .expect("consumer woke up")
            .expect("consumer task");
        assert_eq!(got, "hello");
    }

    #[tokio::test]
    async fn dropped_dequeue_does_not_lose_jobs() {
        let queue = WorkQueue::new();

        let pending = tokio::time::timeout(Duration::from_millis(10), queue.dequeue()).await;
        assert!(pending.is_err());

        queue.enqueue(7);
        assert_eq!(queue.dequeue().await, 7);
    }

    #[test]
    fn enqueue_is_unbounded_and_drain_empties() {
        let queue = WorkQueue::new();
        for i in 0..10_000 {
            queue.enqueue(i);
        }
        assert_eq!(queue.len(), 10_000);
        assert_eq!(queue.drain(), 10_000);
        assert!(queue.is_empty());
        assert_eq!(queue.try_dequeue(), None);
    }

    #[tokio::test]
    async fn concurrent_producers_keep_per_producer_order() {
        let queue = Arc::new(WorkQueue::new());
        let mut producers = Vec::new();
        for p in 0..4u32 {
            let queue = queue.clone();
            producers.push(tokio::spawn(async move {
                for i in 0..100u32 {
                    queue.enqueue((p, i));
                    tokio::task::yield_now().await;
                }
            }));
        }
        for producer in producers {
            producer.await.expect("producer");
        }

        let mut last = [None::<u32>; 4];
        while let Some((p, i)) = queue.try_dequeue() {
            let slot = &mut last[p as usize];
            if let Some(prev) = *slot {
                assert!(i > prev, "producer {p} reordered: {prev} then {i}");
            }
            *slot = Some(i);
        }
        assert!(last.iter().all(|l| *l == Some(99)));
    }
}
