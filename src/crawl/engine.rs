// src/crawl/engine.rs
// =============================================================================
// This module implements the recursive crawl.
//
// How one invocation works:
// 1. Fetch the URL (log it first)
// 2. Extract every reference from the body
// 3. Keep only references nobody has claimed yet (the visited set)
// 4. If nothing new: done
// 5. Append the new references to the output as one record
// 6. Split them into batches and crawl each one recursively, batch after
//    batch, siblings inside a batch concurrently
// 7. Done once every child is done
//
// The whole crawl is done when the seed's invocation is done. There is no
// depth limit; the crawl ends because the visited set eventually stops
// producing new references.
//
// Errors:
// - A failed fetch only ends that branch (it counts as "no links")
// - A failed write to the output aborts everything
//
// Rust concepts:
// - BoxFuture: An async fn can't call itself directly (its future would
//   have infinite size), so crawl() returns a boxed future instead
// - Generics: Crawler<F, S> works with any Fetcher and LinkSink, which is
//   how the tests swap the network for fake pages
// =============================================================================

use super::batch::{batchify, run_batches, DEFAULT_BATCH_SIZE};
use super::stats::{CrawlStats, CrawlSummary};
use super::visited::VisitedSet;
use crate::error::Result;
use crate::output::LinkSink;
use crate::page::{extract_references, Fetched, Fetcher};
use futures::future::{BoxFuture, FutureExt};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

// Knobs for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// How many children of one page are crawled at the same time
    pub batch_size: usize,
    /// Optional cap on fetches in flight across the whole crawl
    pub max_concurrency: Option<usize>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrency: None,
        }
    }
}

pub struct Crawler<F, S> {
    fetcher: F,
    sink: S,
    visited: VisitedSet,
    batch_size: usize,
    // Only held while a request is in flight, never while waiting on
    // children, otherwise nested crawls could starve each other
    fetch_permits: Option<Semaphore>,
    stats: CrawlStats,
}

impl<F: Fetcher, S: LinkSink> Crawler<F, S> {
    pub fn new(fetcher: F, sink: S, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            sink,
            visited: VisitedSet::new(),
            batch_size: config.batch_size.max(1),
            fetch_permits: config.max_concurrency.map(|n| Semaphore::new(n.max(1))),
            stats: CrawlStats::default(),
        }
    }

    // Crawls everything reachable from the seed
    //
    // The seed is marked visited up front, so a page linking back to it
    // doesn't start the crawl over. It isn't written to the output though;
    // only discovered links are.
    pub async fn run(&self, seed: &str) -> Result<CrawlSummary> {
        self.visited.mark(seed);
        self.crawl(seed.to_string()).await?;
        info!("Execution completed.");
        Ok(self.summary())
    }

    pub fn summary(&self) -> CrawlSummary {
        self.stats.snapshot(self.visited.count())
    }

    fn crawl(&self, url: String) -> BoxFuture<'_, Result<()>> {
        self.crawl_page(url).boxed()
    }

    async fn crawl_page(&self, url: String) -> Result<()> {
        let Some(body) = self.fetch(&url).await else {
            return Ok(());
        };

        let frontier = self.visited.claim_new(extract_references(&body));
        if frontier.is_empty() {
            debug!(url = %url, "no new links");
            return Ok(());
        }

        debug!(url = %url, new_links = frontier.len(), "found new links");
        self.sink.append(&frontier).await?;
        self.stats.record_written();

        run_batches(batchify(frontier, self.batch_size), |link| self.crawl(link)).await
    }

    // Returns the body, or None when there's nothing to extract from
    // (unfetchable scheme, or a network failure that has been logged)
    async fn fetch(&self, url: &str) -> Option<String> {
        let _permit = match &self.fetch_permits {
            Some(permits) => Some(permits.acquire().await.ok()?),
            None => None,
        };

        info!("{}", url);

        match self.fetcher.fetch(url).await {
            Ok(Fetched::Body(body)) => {
                self.stats.page_fetched();
                Some(body)
            }
            Ok(Fetched::Unfetchable) => {
                self.stats.skipped_unfetchable();
                None
            }
            Err(e) => {
                let cause = std::error::Error::source(&e)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                warn!(url, error = %e, cause = %cause, "fetch failed, skipping this branch");
                self.stats.fetch_failed();
                None
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is crawl() split from crawl_page()?
//    - crawl_page() awaits crawls of its children, which await theirs...
//    - A future that contains itself would be infinitely large
//    - .boxed() puts the child future on the heap, so the parent only
//      stores a pointer
//
// 2. Why not tokio::spawn each child?
//    - Spawned tasks must be 'static, so everything would need Arc
//    - Polling the children from the parent's future is enough: while one
//      waits on the network, the others make progress
//
// 3. What is let-else?
//    - let Some(body) = ... else { return ... };
//    - Binds body if the pattern matches, otherwise runs the else block,
//      which must leave the function
//
// 4. Why is the semaphore permit called _permit?
//    - The permit is released when it's dropped
//    - Naming it _permit (not _) keeps it alive until the end of fetch()
//    - A bare _ would drop it immediately
// -----------------------------------------------------------------------------
