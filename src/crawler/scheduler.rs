//! Bounded fan-out for crawl units
//!
//! This module handles:
//! - Concurrency limiting via semaphores
//! - Spawning one task per unit of work
//! - Joining every unit before returning (a barrier, not a race)
//! - Writing each result back into the slot of its input index
//!
//! Completion order never leaks into the returned order.

use crate::state::UnitFailure;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Runs a batch of independent units under a permit budget
///
/// A scheduler created with [`BatchScheduler::new`] owns a fresh permit pool;
/// schedulers created with [`BatchScheduler::with_semaphore`] share the pool
/// they are given.
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    /// Semaphore limiting how many units run at once
    semaphore: Arc<Semaphore>,
}

impl BatchScheduler {
    /// Creates a scheduler with its own pool of `budget` permits
    ///
    /// A budget of zero is treated as one so that batches always progress.
    pub fn new(budget: usize) -> Self {
        Self::with_semaphore(Arc::new(Semaphore::new(budget.max(1))))
    }

    /// Creates a scheduler drawing permits from an existing pool
    pub fn with_semaphore(semaphore: Arc<Semaphore>) -> Self {
        Self { semaphore }
    }

    /// Runs `unit` once per item and waits for all of them
    ///
    /// Each unit is spawned on the tokio runtime and holds one permit while it
    /// runs. The returned vector has exactly one slot per input item, in input
    /// order. A unit whose task panics resolves its slot to
    /// `Err(UnitFailure::Aborted)`; its siblings are unaffected.
    ///
    /// # Arguments
    ///
    /// * `items` - The inputs, in discovery order
    /// * `unit` - Builds the future for one `(index, item)` pair
    pub async fn run<T, F, Fut, O>(&self, items: Vec<T>, unit: F) -> Vec<Result<O, UnitFailure>>
    where
        F: Fn(usize, T) -> Fut,
        Fut: Future<Output = O> + Send + 'static,
        O: Send + 'static,
    {
        let handles: Vec<JoinHandle<O>> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let semaphore = Arc::clone(&self.semaphore);
                let work = unit(index, item);

                tokio::spawn(async move {
                    // The pool is never closed; if acquisition fails anyway the
                    // unit still runs rather than stalling the batch.
                    let _permit = semaphore.acquire_owned().await.ok();
                    work.await
                })
            })
            .collect();

        // Every task is already running; awaiting the handles in input order
        // only decides where each result is written.
        let mut results = Vec::with_capacity(handles.len());
        for (index, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(output) => results.push(Ok(output)),
                Err(e) => {
                    let reason = if e.is_panic() {
                        "worker panicked"
                    } else {
                        "worker cancelled"
                    };
                    tracing::error!(index, "Crawl unit failed to complete: {}", reason);
                    results.push(Err(UnitFailure::Aborted(reason.to_string())));
                }
            }
        }

        results
    }
}
