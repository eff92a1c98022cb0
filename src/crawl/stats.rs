// src/crawl/stats.rs
// =============================================================================
// Counters describing how a crawl went.
//
// Many invocations bump these at the same time, so they're plain atomics.
// snapshot() freezes them into a CrawlSummary that can be printed or
// serialized to JSON.
// =============================================================================

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct CrawlStats {
    started: Instant,
    pages_fetched: AtomicUsize,
    fetch_failures: AtomicUsize,
    unfetchable: AtomicUsize,
    records_written: AtomicUsize,
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self {
            started: Instant::now(),
            pages_fetched: AtomicUsize::new(0),
            fetch_failures: AtomicUsize::new(0),
            unfetchable: AtomicUsize::new(0),
            records_written: AtomicUsize::new(0),
        }
    }
}

impl CrawlStats {
    pub fn page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn skipped_unfetchable(&self) {
        self.unfetchable.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_written(&self) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
    }

    // links_discovered comes from the visited set, which owns that number
    pub fn snapshot(&self, links_discovered: usize) -> CrawlSummary {
        CrawlSummary {
            links_discovered,
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            unfetchable: self.unfetchable.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlSummary {
    /// Distinct URLs accepted for crawling, the seed included
    pub links_discovered: usize,
    /// Pages whose body was downloaded
    pub pages_fetched: usize,
    /// Pages that failed with a network error
    pub fetch_failures: usize,
    /// References skipped because they aren't http(s)
    pub unfetchable: usize,
    /// Records appended to the output file
    pub records_written: usize,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

fn as_millis<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis() as u64)
}
