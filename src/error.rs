// src/error.rs
// =============================================================================
// Error types shared by the crawler modules.
//
// There are three families:
// - FetchError: one URL could not be retrieved. Never fatal, the crawl
//   just treats that page as having no links.
// - SinkError: the output file could not be written. Always fatal, there
//   is no way to recover lost crawl output.
// - CrawlError: what can make the whole crawl fail. Today that's only
//   the output, but it's kept separate so the engine has one error type.
//
// Messages only describe their own layer; the underlying error is exposed
// as source(), so printing with {:#} shows every cause exactly once.
// main.rs converts these into anyhow errors and an exit code.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read body of {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("cannot open output file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot append to output file")]
    Write(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("persisting discovered links failed")]
    Persist(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cause_chain_mentions_each_layer_once() {
        let err = CrawlError::from(SinkError::Write(std::io::Error::other("disk full")));
        let chain = format!("{:#}", anyhow::Error::from(err));

        assert_eq!(
            chain,
            "persisting discovered links failed: cannot append to output file: disk full"
        );
    }

    #[test]
    fn test_open_error_names_the_path() {
        let err = SinkError::Open {
            path: PathBuf::from("/nowhere/urls.txt"),
            source: std::io::Error::other("denied"),
        };
        let chain = format!("{:#}", anyhow::Error::from(err));

        assert_eq!(chain, "cannot open output file /nowhere/urls.txt: denied");
        assert_eq!(chain.matches("denied").count(), 1);
    }

    #[test]
    fn test_request_error_keeps_url_and_source() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = FetchError::Request {
            url: "not a url".to_string(),
            source,
        };

        assert_eq!(err.to_string(), "request to not a url failed");
        assert!(std::error::Error::source(&err).is_some());
    }
}
