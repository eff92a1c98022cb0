// src/crawl/batch.rs
// =============================================================================
// Splits a frontier into fixed-size batches and runs them one after another.
//
// Inside a batch every crawl runs concurrently. Between batches there is a
// hard barrier: batch i+1 doesn't start until every crawl in batch i (and
// everything those crawls spawned in turn) has finished.
//
// This bounds how many fetches one page fans out to directly. It is NOT a
// global limit; every child immediately schedules its own batches.
// =============================================================================

use futures::future::try_join_all;
use std::future::Future;
use tracing::debug;

pub const DEFAULT_BATCH_SIZE: usize = 5;

// Splits items into contiguous groups of at most batch_size, keeping order
//
// Example:
//   items = [1..=12], batch_size = 5
//   result = [[1,2,3,4,5], [6,7,8,9,10], [11,12]]
//
// A batch_size of 0 is treated as 1.
pub fn batchify<T>(items: Vec<T>, batch_size: usize) -> Vec<Vec<T>> {
    let size = batch_size.max(1);
    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut items = items.into_iter().peekable();

    while items.peek().is_some() {
        batches.push(items.by_ref().take(size).collect());
    }

    batches
}

// Runs every batch in sequence, every item of a batch concurrently
//
// `run` is called once per item, in batch order, and each returned future
// is polled together with its siblings. The first error stops the whole
// schedule and is returned; the remaining batches never start.
pub async fn run_batches<T, E, F, Fut>(batches: Vec<Vec<T>>, mut run: F) -> Result<(), E>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let total = batches.len();

    for (index, batch) in batches.into_iter().enumerate() {
        debug!(batch = index + 1, of = total, size = batch.len(), "starting batch");
        try_join_all(batch.into_iter().map(&mut run)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_twelve_items_make_three_batches() {
        let items: Vec<u32> = (1..=12).collect();
        let batches = batchify(items, 5);
        let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
        assert_eq!(batches[2], vec![11, 12]);
    }

    #[test]
    fn test_batch_count_and_membership() {
        for n in 0..20usize {
            for b in 1..7usize {
                let items: Vec<usize> = (0..n).collect();
                let batches = batchify(items.clone(), b);
                assert_eq!(batches.len(), n.div_ceil(b));
                assert!(batches.iter().all(|batch| !batch.is_empty() && batch.len() <= b));
                let flattened: Vec<usize> = batches.into_iter().flatten().collect();
                assert_eq!(flattened, items);
            }
        }
    }

    #[test]
    fn test_zero_batch_size_acts_like_one() {
        let batches = batchify(vec!["a", "b"], 0);
        assert_eq!(batches, vec![vec!["a"], vec!["b"]]);
    }

    #[tokio::test]
    async fn test_batches_run_in_sequence() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let result: Result<(), ()> = run_batches(batchify((0..7).collect(), 3), |item: u32| {
            let log = Arc::clone(&log);
            async move {
                log.lock().push(format!("start {}", item));
                // Give siblings a chance to interleave
                tokio::task::yield_now().await;
                log.lock().push(format!("end {}", item));
                Ok(())
            }
        })
        .await;
        assert!(result.is_ok());

        let log = log.lock();
        let position = |entry: String| log.iter().position(|e| *e == entry).unwrap();

        // Every item of a batch ends before any item of the next batch starts
        for (done, next) in [(0..3, 3..6), (3..6, 6..7)] {
            let last_end = done.map(|i| position(format!("end {}", i))).max().unwrap();
            let first_start = next.map(|i| position(format!("start {}", i))).min().unwrap();
            assert!(last_end < first_start);
        }

        // Items within a batch overlap
        assert!(position("start 1".to_string()) < position("end 0".to_string()));
    }

    #[tokio::test]
    async fn test_error_stops_later_batches() {
        let started = Arc::new(Mutex::new(Vec::new()));

        let result = run_batches(batchify(vec![1, 2, 3, 4], 2), |item: u32| {
            let started = Arc::clone(&started);
            async move {
                started.lock().push(item);
                if item == 2 {
                    Err("boom")
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(result, Err("boom"));
        assert_eq!(*started.lock(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_empty_schedule_completes() {
        let result: Result<(), ()> = run_batches(Vec::<Vec<u32>>::new(), |_| async { Ok(()) }).await;
        assert!(result.is_ok());
    }
}
