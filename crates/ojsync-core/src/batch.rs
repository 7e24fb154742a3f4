//! Batch driver: push a set of items through the queue with ledger tracking.
//!
//! This is the job-body glue shared by the transfer scripts: skip items the
//! ledger already records as done, and wrap each remaining item's transfer
//! in the two-phase mark (in-progress before the operation, done only after
//! it fully succeeded). A crash between the two marks leaves the item
//! recorded as interrupted, so the next run redoes it.

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::ledger::Ledger;
use crate::queue::Queue;

/// One logical transfer item.
///
/// `key` is the ledger identity; `payload` is whatever the operation needs
/// to do the actual work (typically a storage path or remote id). The two
/// are deliberately separate so renaming target paths cannot collide with
/// or orphan ledger entries.
#[derive(Debug, Clone)]
pub struct BatchItem<T> {
    pub key: String,
    pub payload: T,
}

impl<T> BatchItem<T> {
    pub fn new(key: impl Into<String>, payload: T) -> Self {
        Self {
            key: key.into(),
            payload,
        }
    }
}

/// Counts reported by a completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Items whose operation ran to completion this batch.
    pub processed: usize,
    /// Items skipped because the ledger already had them done.
    pub skipped: usize,
}

/// Run `op` for every item not yet marked done, at most the queue's
/// concurrency at a time.
///
/// Fails fast: the first item error aborts the batch (remaining spawned
/// items are cancelled) and propagates, so a restart wrapper re-enters from
/// the top and skips everything that completed in the meantime. Keys must be
/// unique within one batch — the ledger's write-then-persist sequence for a
/// key assumes at most one concurrent task owns it.
///
/// Completion order is unrelated to submission order; callers wanting a
/// deterministic manifest sort their own results afterwards.
pub async fn process_items<T, F, Fut>(
    queue: Arc<Queue>,
    ledger: Arc<Mutex<Ledger>>,
    items: Vec<BatchItem<T>>,
    op: F,
) -> Result<BatchOutcome>
where
    T: Send + 'static,
    F: Fn(String, T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let mut skipped = 0usize;
    let mut join_set = JoinSet::new();

    for BatchItem { key, payload } in items {
        if ledger.lock().await.is_done(&key) {
            tracing::debug!(key = %key, "item already done, skipping");
            skipped += 1;
            continue;
        }
        let queue = Arc::clone(&queue);
        let ledger = Arc::clone(&ledger);
        let op = op.clone();
        join_set.spawn(async move {
            let settled = queue
                .wait_for_task(async {
                    ledger.lock().await.mark_in_progress(&key)?;
                    op(key.clone(), payload)
                        .await
                        .with_context(|| format!("transfer item {key}"))?;
                    ledger.lock().await.mark_done(&key)?;
                    tracing::debug!(key = %key, "item done");
                    Ok::<(), anyhow::Error>(())
                })
                .await;
            match settled {
                Ok(item_result) => item_result,
                Err(closed) => Err(anyhow::Error::new(closed)),
            }
        });
    }

    let mut processed = 0usize;
    while let Some(res) = join_set.join_next().await {
        res.map_err(|e| anyhow::anyhow!("batch task join: {}", e))??;
        processed += 1;
    }

    Ok(BatchOutcome { processed, skipped })
}
