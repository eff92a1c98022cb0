// src/crawl/mod.rs
// =============================================================================
// This module drives the recursive crawl.
//
// Submodules:
// - visited: The global "have we seen this URL" set
// - batch: Splits new links into groups and runs them group by group
// - engine: The recursive fetch -> extract -> filter -> record -> recurse loop
// - stats: Counters for the end-of-crawl summary
//
// Only the engine and its inputs/outputs are exported; the rest are
// implementation details.
// =============================================================================

mod batch;
mod engine;
mod stats;
mod visited;

pub use batch::DEFAULT_BATCH_SIZE;
pub use engine::{CrawlConfig, Crawler};
pub use stats::CrawlSummary;
