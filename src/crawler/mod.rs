//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeouts and redirect handling
//! - HTML parsing and link extraction
//! - Worker slots and the politeness delay
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, CrawlReport, CrawlSession, EnqueueOutcome};
pub use fetcher::{build_http_client, fetch_url, is_html, FetchResult};
pub use parser::{parse_html, ParsedPage};
pub use scheduler::{effective_delay, Scheduler};

use crate::config::CrawlConfig;
use crate::SitewalkError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Fetch robots.txt for the seed's origin
/// 3. Queue the seed
/// 4. Fetch pages on `concurrency` worker slots
/// 5. Extract and follow same-site links until the frontier is idle
///
/// Writing the report to disk is left to [`crate::output::write_outputs`].
///
/// # Arguments
///
/// * `config` - The resolved run configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; individual pages may have failed
/// * `Err(SitewalkError)` - Crawl could not start
pub async fn crawl(config: CrawlConfig) -> Result<CrawlReport, SitewalkError> {
    run_crawl(config).await
}
