//! Concurrent batch engine.
//!
//! Fans a sequence of inputs out across a bounded number of in-flight
//! operations (semaphore admission control), isolates per-item failures,
//! reports progress as items complete, and aggregates outcomes into a
//! [`BatchSummary`] ordered by input position.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::sync::Semaphore;

use crate::error::{AiornotError, Result};
use crate::options::ProgressCallback;
use crate::types::batch::{BatchResult, BatchSummary};

/// Serializes completion accounting so the callback always observes a
/// monotone non-decreasing `completed` count, even when items finish on
/// different worker threads at the same instant.
struct ProgressTracker {
    completed: Mutex<usize>,
    total: usize,
    callback: Option<ProgressCallback>,
}

impl ProgressTracker {
    fn new(callback: Option<ProgressCallback>, total: usize) -> Self {
        Self {
            completed: Mutex::new(0),
            total,
            callback,
        }
    }

    fn item_done(&self) {
        let mut completed = self
            .completed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *completed += 1;
        if let Some(callback) = &self.callback {
            callback(*completed, self.total);
        }
    }
}

/// Run `operation` over every item with at most `max_concurrency`
/// operations in flight at once.
///
/// Each item gets a stable index matching input order; the summary lists
/// outcomes in that order regardless of completion order. Item failures
/// become error outcomes unless `fail_fast` is set, in which case the
/// first failure is returned to the caller and already-completed
/// outcomes are discarded. Fail-fast is soft: operations that already
/// started are not aborted, but their outcomes are never collected.
///
/// The progress callback fires once per finished item (success or
/// failure, including the failure that triggers fail-fast) with
/// `(completed_so_far, total)`.
pub async fn run_batch<I, T, Op, Fut>(
    items: Vec<I>,
    max_concurrency: usize,
    on_progress: Option<ProgressCallback>,
    fail_fast: bool,
    operation: Op,
) -> Result<BatchSummary<T>>
where
    I: std::fmt::Display + Send + 'static,
    T: Send + 'static,
    Op: Fn(I, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let total = items.len();
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let operation = Arc::new(operation);
    let progress = Arc::new(ProgressTracker::new(on_progress, total));

    let mut labels = Vec::with_capacity(total);
    let mut handles = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        let label = item.to_string();
        labels.push(label.clone());

        let semaphore = Arc::clone(&semaphore);
        let operation = Arc::clone(&operation);
        let progress = Arc::clone(&progress);

        handles.push(tokio::spawn(async move {
            let permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    // The gate is never closed while tasks hold a clone.
                    return Err(AiornotError::Runtime("concurrency gate closed".to_string()));
                }
            };

            let start = Instant::now();
            let result = operation(item, index).await;
            let duration_ms = start.elapsed().as_millis() as u64;
            drop(permit); // Release the concurrency slot before accounting

            let outcome = match result {
                Ok(value) => Ok(BatchResult::success(label, value, duration_ms)),
                Err(e) if fail_fast => Err(e),
                Err(e) => Ok(BatchResult::failure(
                    label,
                    e.kind(),
                    e.to_string(),
                    duration_ms,
                )),
            };
            progress.item_done();
            outcome
        }));
    }

    let mut results = Vec::with_capacity(total);
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(Ok(result)) => results.push(result),
            // Fail-fast abort: the error propagates and completed
            // outcomes are discarded; remaining tasks finish detached.
            Ok(Err(e)) => return Err(e),
            Err(join_err) => {
                tracing::error!(input = %labels[index], "batch task failed: {join_err}");
                results.push(BatchResult::failure(
                    labels[index].clone(),
                    "runtime",
                    format!("batch task failed: {join_err}"),
                    0,
                ));
            }
        }
    }

    Ok(BatchSummary::from_results(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn collecting_callback() -> (ProgressCallback, Arc<Mutex<Vec<(usize, usize)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_clone = calls.clone();
        let callback: ProgressCallback = Arc::new(move |done, total| {
            calls_clone.lock().unwrap().push((done, total));
        });
        (callback, calls)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_all_success_preserves_input_order() {
        let items: Vec<u32> = (0..10).collect();
        let summary = run_batch(items, 4, None, false, |item: u32, index| async move {
            // Later items finish first to shuffle completion order
            tokio::time::sleep(Duration::from_millis(20 - index as u64)).await;
            Ok(item * 2)
        })
        .await
        .unwrap();

        assert_eq!(summary.total(), 10);
        assert_eq!(summary.succeeded(), 10);
        assert_eq!(summary.failed(), 0);
        assert_eq!(
            summary.succeeded() + summary.failed(),
            summary.results().len()
        );
        for (i, result) in summary.results().iter().enumerate() {
            assert_eq!(result.input, i.to_string());
            assert_eq!(result.value(), Some(&(i as u32 * 2)));
            assert!(result.duration_ms.is_some());
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_partial_failures_are_recorded() {
        let items: Vec<u32> = (0..9).collect();
        let summary = run_batch(items, 3, None, false, |item: u32, index| async move {
            if index % 3 == 0 {
                Err(AiornotError::Timeout("too slow".to_string()))
            } else {
                Ok(item)
            }
        })
        .await
        .unwrap();

        assert_eq!(summary.total(), 9);
        assert_eq!(summary.failed(), 3);
        assert_eq!(summary.succeeded(), 6);
        match &summary.results()[0].outcome {
            crate::types::batch::BatchOutcome::Error { kind, message } => {
                assert_eq!(kind, "timeout");
                assert!(message.contains("too slow"));
            }
            other => panic!("expected error outcome, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fail_fast_propagates_without_summary() {
        let items: Vec<u32> = (0..5).collect();
        let err = run_batch(items, 2, None, true, |item: u32, index| async move {
            if index == 1 {
                Err(AiornotError::Server {
                    status: 500,
                    message: "boom".to_string(),
                    body: None,
                })
            } else {
                Ok(item)
            }
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind(), "server");
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_progress_is_monotone_and_complete() {
        let (callback, calls) = collecting_callback();
        let items: Vec<u32> = (0..8).collect();
        let summary = run_batch(items, 4, Some(callback), false, |item: u32, index| {
            async move {
                tokio::time::sleep(Duration::from_millis(index as u64 % 3)).await;
                Ok(item)
            }
        })
        .await
        .unwrap();

        assert_eq!(summary.total(), 8);
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 8);
        let mut previous = 0;
        for (done, total) in calls.iter() {
            assert_eq!(*total, 8);
            assert!(*done >= previous, "progress went backwards");
            previous = *done;
        }
        assert_eq!(previous, 8);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_progress_fires_for_failed_items() {
        let (callback, calls) = collecting_callback();
        let items: Vec<u32> = (0..4).collect();
        run_batch(items, 2, Some(callback), false, |_item: u32, _| async move {
            Err::<u32, _>(AiornotError::Transport("refused".to_string()))
        })
        .await
        .unwrap();

        assert_eq!(calls.lock().unwrap().len(), 4);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_batch() {
        let (callback, calls) = collecting_callback();
        let summary = run_batch(
            Vec::<String>::new(),
            5,
            Some(callback),
            false,
            |_item, _| async move { Ok(0u32) },
        )
        .await
        .unwrap();

        assert_eq!(summary.total(), 0);
        assert_eq!(summary.success_rate(), 0.0);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_semaphore_bounds_concurrency() {
        let in_flight = Arc::new(AtomicU32::new(0));
        let max_seen = Arc::new(AtomicU32::new(0));
        let in_flight_op = in_flight.clone();
        let max_seen_op = max_seen.clone();

        let items: Vec<u32> = (0..9).collect();
        let summary = run_batch(items, 2, None, false, move |item: u32, _| {
            let in_flight = in_flight_op.clone();
            let max_seen = max_seen_op.clone();
            async move {
                let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(current, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(30)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(item)
            }
        })
        .await
        .unwrap();

        assert_eq!(summary.succeeded(), 9);
        assert!(
            max_seen.load(Ordering::SeqCst) <= 2,
            "admission gate violated: {} in flight",
            max_seen.load(Ordering::SeqCst)
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_zero_concurrency_is_clamped_to_one() {
        let items: Vec<u32> = (0..3).collect();
        let summary = run_batch(items, 0, None, false, |item: u32, _| async move { Ok(item) })
            .await
            .unwrap();
        assert_eq!(summary.succeeded(), 3);
    }
}
