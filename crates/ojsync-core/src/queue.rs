//! Bounded-concurrency task queue.
//!
//! Admits at most `concurrency` tasks at once. Callers hand in a future and
//! get its output back once the task has been admitted and has settled.
//! Backed by a fair counting semaphore, so admission order is FIFO among
//! callers waiting while the queue is full.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::Semaphore;

/// Error returned when a task is submitted to (or was still waiting on)
/// a queue that has been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("queue closed")]
pub struct QueueClosed;

/// Concurrency-bounded task queue.
///
/// Tasks are opaque futures; the queue never inspects, logs, or retries
/// their output. A task's own error is the submitter's to observe — the
/// queue only guarantees the slot it occupied is released once it settles.
#[derive(Debug)]
pub struct Queue {
    concurrency: usize,
    semaphore: Semaphore,
    running: AtomicUsize,
}

/// Decrements `running` on drop so a panicking task cannot leak the count.
struct RunningGuard<'a>(&'a AtomicUsize);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Queue {
    /// Create a queue admitting at most `concurrency` tasks at once.
    /// A limit of 0 is clamped to 1.
    pub fn new(concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            concurrency,
            semaphore: Semaphore::new(concurrency),
            running: AtomicUsize::new(0),
        }
    }

    /// The admission limit this queue was built with.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Number of tasks currently admitted and running. Never exceeds
    /// `concurrency()`.
    pub fn running(&self) -> usize {
        self.running.load(Ordering::Acquire)
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    /// Submit one task. Suspends until a slot is free (FIFO among waiting
    /// submitters), runs the future to completion, and returns its output.
    ///
    /// Returns `Err(QueueClosed)` if the queue was closed before this task
    /// was admitted. The slot is released on every exit path, so a task that
    /// fails (or panics) does not shrink the queue's effective concurrency.
    pub async fn wait_for_task<F>(&self, task: F) -> Result<F::Output, QueueClosed>
    where
        F: Future,
    {
        let permit = self.semaphore.acquire().await.map_err(|_| QueueClosed)?;
        self.running.fetch_add(1, Ordering::AcqRel);
        let guard = RunningGuard(&self.running);
        let out = task.await;
        drop(guard);
        drop(permit);
        Ok(out)
    }

    /// Stop admitting tasks. Idempotent. Tasks already admitted keep running
    /// to completion; submitters still waiting for admission resolve with
    /// `QueueClosed`. Callers wanting a full drain await their outstanding
    /// `wait_for_task` calls before discarding the queue.
    pub fn close(&self) {
        self.semaphore.close();
    }
}

impl Default for Queue {
    /// A serial queue (concurrency 1).
    fn default() -> Self {
        Self::new(1)
    }
}
