//! Output writer trait and error types
//!
//! Every output format is an [`OutputWriter`] that renders a finished
//! [`CrawlReport`] into a byte sink. Writers never see the crawl while it is
//! running, so all three files describe the same URL set.

use crate::crawler::CrawlReport;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {file}: {source}")]
    Write {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to format JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write sitemap: {0}")]
    Sitemap(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One output format
pub trait OutputWriter {
    /// File name inside the output directory, e.g. `urls.json`
    fn file_name(&self) -> &'static str;

    /// Renders the report into `out`
    ///
    /// # Arguments
    ///
    /// * `report` - The finished crawl
    /// * `out` - Destination; not flushed by the caller
    fn write(&self, report: &CrawlReport, out: &mut dyn Write) -> OutputResult<()>;
}
