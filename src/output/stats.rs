//! Statistics derived from a finished crawl
//!
//! This module summarizes a [`CrawlReport`] and logs the summary at the end
//! of a run.

use crate::crawler::{is_html, CrawlReport};
use std::collections::BTreeMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Number of URLs admitted to the frontier
    pub pages_discovered: usize,

    /// Number of URLs a fetch was attempted for
    pub pages_fetched: usize,

    /// Fetches that ended in a 2xx response
    pub pages_succeeded: usize,

    /// Successful fetches whose body was HTML
    pub html_pages: usize,

    /// Fetches answered with a redirect that was not followed
    pub redirects: usize,

    /// Fetches recorded as errors
    pub pages_failed: usize,

    /// Failures without any HTTP status (timeouts, DNS, refused connections)
    pub network_errors: usize,

    /// Count of records per HTTP status code
    pub status_counts: BTreeMap<u16, usize>,

    /// Wall time of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Computes statistics from a report
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut stats = Self {
            pages_discovered: report.urls.len(),
            pages_fetched: report.details.len(),
            elapsed: report.elapsed,
            ..Self::default()
        };

        for record in &report.details {
            if record.is_success() {
                stats.pages_succeeded += 1;
                if record.content_type().is_some_and(is_html) {
                    stats.html_pages += 1;
                }
            } else if record.is_redirect() {
                stats.redirects += 1;
            } else {
                stats.pages_failed += 1;
            }

            match record.status() {
                Some(status) => *stats.status_counts.entry(status).or_insert(0) += 1,
                None => stats.network_errors += 1,
            }
        }

        stats
    }

    /// Returns the success rate as a percentage of fetched pages
    pub fn success_rate(&self) -> f64 {
        if self.pages_fetched == 0 {
            return 0.0;
        }
        (self.pages_succeeded as f64 / self.pages_fetched as f64) * 100.0
    }

    /// Average fetch throughput over the whole run
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.pages_fetched as f64 / secs
    }
}

/// Logs statistics at info level
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!(
        "Crawl statistics: {} discovered, {} fetched, {} ok ({} HTML), {} redirected, {} failed",
        stats.pages_discovered,
        stats.pages_fetched,
        stats.pages_succeeded,
        stats.html_pages,
        stats.redirects,
        stats.pages_failed
    );

    if !stats.status_counts.is_empty() {
        let breakdown = stats
            .status_counts
            .iter()
            .map(|(status, count)| format!("{}: {}", status, count))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!("Status codes: {}", breakdown);
    }

    if stats.network_errors > 0 {
        tracing::info!("Network errors: {}", stats.network_errors);
    }

    tracing::info!(
        "Success rate: {:.1}%, {:.2} pages/sec over {:.1}s",
        stats.success_rate(),
        stats.pages_per_second(),
        stats.elapsed.as_secs_f64()
    );
}
