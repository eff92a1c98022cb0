// src/page/http.rs
// =============================================================================
// This module downloads pages.
//
// Key functionality:
// - Decides from the URL's text prefix whether it can be fetched at all
// - Issues a single GET and reads the whole body
// - Reports network failures as FetchError so the caller can tell
//   "couldn't fetch" apart from "fetched, nothing inside"
//
// What we deliberately do NOT do:
// - Follow redirects (a 301 body is just a body)
// - Look at status codes (a 404 page can still contain links)
// - Send custom headers or credentials
//
// The Fetcher trait exists so the crawl engine can be tested with fake
// pages instead of a real network.
// =============================================================================

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

// Which transport a URL asks for, decided purely by its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Https,
    Http,
}

impl Scheme {
    // Returns None for anything that isn't plain or secure HTTP
    // (mailto:, javascript:, relative paths, scheme-relative //host/...)
    pub fn detect(url: &str) -> Option<Self> {
        if url.starts_with("https://") {
            Some(Scheme::Https)
        } else if url.starts_with("http://") {
            Some(Scheme::Http)
        } else {
            None
        }
    }
}

// Outcome of a successful fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// The full response body
    Body(String),
    /// The URL has no scheme we know how to fetch. Not an error.
    Unfetchable,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Fetched, FetchError>;
}

// The real network fetcher backed by reqwest
//
// Client is cheap to clone (it's reference counted internally) and pools
// connections, so one instance serves the whole crawl.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Parameters:
    //   timeout: upper bound for one whole request, None = wait forever
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder().redirect(reqwest::redirect::Policy::none());

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched, FetchError> {
        let Some(scheme) = Scheme::detect(url) else {
            debug!(url, "skipping unfetchable reference");
            return Ok(Fetched::Unfetchable);
        };

        debug!(url, ?scheme, "sending request");

        let response = self.client.get(url).send().await.map_err(|source| {
            FetchError::Request {
                url: url.to_string(),
                source,
            }
        })?;

        // Any delivered body counts, whatever the status code says
        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(Fetched::Body(body))
    }
}
