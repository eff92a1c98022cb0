// src/page/mod.rs
// =============================================================================
// Everything that deals with a single page.
//
// Submodules:
// - http: Downloads a page (or decides it can't be downloaded)
// - html: Pulls raw references out of the downloaded markup
//
// Neither knows anything about the crawl as a whole; the crawl module
// glues them together.
// =============================================================================

mod html;
mod http;

pub use html::{extract_references, Reference};
pub use http::{Fetched, Fetcher, HttpFetcher};
