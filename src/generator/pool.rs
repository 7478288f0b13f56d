//! # Bounded Worker Pool
//!
//! A fixed number of cooperative workers pull item indices from one shared cursor
//! until the list is exhausted. All workers are polled on the caller's task, so
//! concurrency is bounded by the worker count and nothing runs in parallel.
//!
//! ```text
//! items:   [d0] [d1] [d2] [d3] [d4] [d5]
//!            ^ cursor (fetch_add)
//! worker 0: d0 ---------> d3 -----> d5
//! worker 1: d1 --> d4
//! worker 2: d2 -----------------------> (exhausted)
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{AdminError, AdminResult};

/// Receiving side of a cancellation request
///
/// Workers stop pulling new items once cancelled, and guarded calls in flight
/// resolve to `AdminError::Cancelled`.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

/// Sending side of a cancellation request
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // Err only when every signal has already been dropped
        let _ = self.tx.send(true);
    }
}

impl CancelSignal {
    pub fn pair() -> (CancelHandle, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelSignal { rx })
    }

    /// A signal that is never raised
    pub fn never() -> Self {
        let (_handle, signal) = Self::pair();
        signal
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested; pends forever otherwise
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Handle dropped without cancelling
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Run one external call under a timeout, aborting early on cancellation
pub async fn guarded<T, F>(
    cancel: &CancelSignal,
    timeout: Duration,
    operation: &str,
    call: F,
) -> AdminResult<T>
where
    F: Future<Output = AdminResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AdminError::Cancelled(operation.to_string())),
        result = tokio::time::timeout(timeout, call) => {
            result.unwrap_or_else(|_| Err(AdminError::Timeout(operation.to_string())))
        }
    }
}

/// Results of one pool run
#[derive(Debug)]
pub struct PoolOutcome<R> {
    /// `(item index, result)` in completion order
    pub completed: Vec<(usize, R)>,
    /// Indices never picked up because the run was cancelled
    pub unprocessed: Vec<usize>,
}

#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    size: usize,
}

impl WorkerPool {
    /// A pool of `size` workers (at least one)
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Process every item with `work`, at most `size` at a time
    ///
    /// Each worker handles its items strictly one after another; the next item is
    /// taken only after the previous `work` future has resolved.
    pub async fn run<'a, T, R, F, Fut>(
        &self,
        items: &'a [T],
        cancel: &CancelSignal,
        work: F,
    ) -> PoolOutcome<R>
    where
        F: Fn(&'a T) -> Fut,
        Fut: Future<Output = R>,
    {
        let cursor = AtomicUsize::new(0);
        let completed = Mutex::new(Vec::with_capacity(items.len()));
        let worker_count = self.size.min(items.len());

        debug!(
            items = items.len(),
            workers = worker_count,
            "Starting bounded worker pool"
        );

        let workers = (0..worker_count).map(|worker_id| {
            let cursor = &cursor;
            let completed = &completed;
            let work = &work;
            async move {
                loop {
                    if cancel.is_cancelled() {
                        debug!(worker_id, "Worker stopping on cancellation");
                        break;
                    }
                    let index = cursor.fetch_add(1, Ordering::SeqCst);
                    let Some(item) = items.get(index) else {
                        break;
                    };
                    let result = work(item).await;
                    completed.lock().push((index, result));
                }
            }
        });
        join_all(workers).await;

        let taken = cursor.load(Ordering::SeqCst).min(items.len());
        PoolOutcome {
            completed: completed.into_inner(),
            unprocessed: (taken..items.len()).collect(),
        }
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(crate::constants::CONCURRENCY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_processes_every_item_once() {
        let items: Vec<u32> = (0..10).collect();
        let outcome = WorkerPool::new(3)
            .run(&items, &CancelSignal::never(), |item| async move {
                tokio::task::yield_now().await;
                item * 2
            })
            .await;

        let mut indices: Vec<usize> = outcome.completed.iter().map(|(i, _)| *i).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
        assert!(outcome
            .completed
            .iter()
            .all(|(index, doubled)| *doubled == items[*index] * 2));
        assert!(outcome.unprocessed.is_empty());
    }

    #[tokio::test]
    async fn test_never_exceeds_pool_size() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let items: Vec<u32> = (0..12).collect();
        let (in_flight_ref, peak_ref) = (&in_flight, &peak);

        WorkerPool::new(3)
            .run(&items, &CancelSignal::never(), move |_| async move {
                let (in_flight, peak) = (in_flight_ref, peak_ref);
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_input_spawns_no_work() {
        let items: Vec<u32> = Vec::new();
        let outcome = WorkerPool::new(3)
            .run(&items, &CancelSignal::never(), |_| async {})
            .await;
        let completed: Vec<(usize, ())> = outcome.completed;
        assert!(completed.is_empty());
        assert!(outcome.unprocessed.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_start_leaves_everything_unprocessed() {
        let (handle, signal) = CancelSignal::pair();
        handle.cancel();
        let items = vec![1, 2, 3];
        let outcome = WorkerPool::new(2)
            .run(&items, &signal, |item| async move { *item })
            .await;
        assert!(outcome.completed.is_empty());
        assert_eq!(outcome.unprocessed, vec![0, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_guarded_times_out() {
        let result: AdminResult<()> = guarded(
            &CancelSignal::never(),
            Duration::from_millis(50),
            "slow call",
            async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(())
            },
        )
        .await;
        assert!(matches!(result, Err(AdminError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_guarded_observes_cancellation() {
        let (handle, signal) = CancelSignal::pair();
        let call = guarded(&signal, Duration::from_secs(60), "stalled", async {
            std::future::pending::<AdminResult<()>>().await
        });
        handle.cancel();
        assert!(matches!(call.await, Err(AdminError::Cancelled(_))));
    }

    #[test]
    fn test_pool_size_floor() {
        assert_eq!(WorkerPool::new(0).size(), 1);
        assert_eq!(WorkerPool::default().size(), 3);
    }
}
