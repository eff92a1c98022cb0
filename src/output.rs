// src/output.rs
// =============================================================================
// Where discovered links end up.
//
// The crawl engine hands every non-empty frontier to a LinkSink exactly once.
// The real sink is an append-only text file with one URL per line:
// - The file is truncated when the crawl starts
// - Each frontier is written with a single write_all, so records from
//   concurrent branches may come in any order but never interleave
// - Every record ends with a newline, so consecutive records don't run
//   together on one line
//
// Write failures are returned to the engine, which aborts the crawl.
// =============================================================================

use crate::error::SinkError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub const DEFAULT_OUTPUT_FILE: &str = "urls.txt";

#[async_trait]
pub trait LinkSink: Send + Sync {
    async fn append(&self, links: &[String]) -> Result<(), SinkError>;
}

pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    // Creates the output file, wiping whatever a previous crawl left there
    pub async fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).await.map_err(|source| SinkError::Open {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LinkSink for FileSink {
    async fn append(&self, links: &[String]) -> Result<(), SinkError> {
        if links.is_empty() {
            return Ok(());
        }

        let mut record = links.join("\n");
        record.push('\n');

        // Holding the lock across the write keeps each record in one piece
        let mut file = self.file.lock().await;
        file.write_all(record.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
