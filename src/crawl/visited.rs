// src/crawl/visited.rs
// =============================================================================
// The process-wide record of every URL ever accepted for crawling.
//
// This is the only shared mutable state in the crawler. Every invocation
// passes its freshly extracted references through claim_new(), and the
// first invocation to offer a given string wins it; everybody after that
// sees it as already visited.
//
// Strings are compared exactly as written. "/a" and "/a/" are different
// URLs here, and so are "http://x.com" and "HTTP://X.COM".
// =============================================================================

use crate::page::Reference;
use parking_lot::Mutex;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Marks a single URL as visited. Returns true if it wasn't already.
    pub fn mark(&self, url: &str) -> bool {
        self.seen.lock().insert(url.to_string())
    }

    // Filters references down to the ones nobody has claimed yet
    //
    // - None placeholders (elements without href) are dropped first and never
    //   take a slot in the set
    // - Input order is preserved
    // - A string repeated in the input only survives at its first position
    //
    // The lock is held for the whole call, so a batch of references is
    // checked and marked as one step.
    pub fn claim_new<I>(&self, references: I) -> Vec<String>
    where
        I: IntoIterator<Item = Reference>,
    {
        let mut seen = self.seen.lock();

        references
            .into_iter()
            .flatten()
            .filter(|url| {
                if seen.contains(url) {
                    false
                } else {
                    seen.insert(url.clone());
                    true
                }
            })
            .collect()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Mutex if everything runs on one task?
//    - Today the crawl futures are all polled from one task, so two
//      filter steps can never overlap
//    - With the lock, check-and-mark stays atomic even if crawls are
//      spawned onto other threads
//
// 2. Why parking_lot instead of std::sync::Mutex?
//    - lock() returns the guard directly, no poisoning Result to unwrap
//
// 3. What does .flatten() do on Option items?
//    - Option is an iterator of zero or one items
//    - Flattening turns [Some(a), None, Some(b)] into [a, b]
// -----------------------------------------------------------------------------
