//! Crawler coordinator - main crawl orchestration logic
//!
//! This module owns the per-run [`CrawlSession`], which ties together:
//! - The shared HTTP client and the robots.txt policy fetched once per run
//! - The scope filter derived from the seed
//! - The frontier and the list of page results
//! - Link admission (normalize, scope, robots, dedup, cap)
//!
//! [`crawl`] drives a session from the seed to an idle frontier and returns a
//! [`CrawlReport`].

use crate::config::CrawlConfig;
use crate::crawler::parser::parse_html;
use crate::crawler::scheduler::{effective_delay, Scheduler};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::robots::{fetch_robots, RobotsPolicy};
use crate::state::{Admission, Frontier, PageRecord};
use crate::url::{normalize_url, ScopeFilter};
use crate::{SitewalkError, UrlError};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use url::Url;

/// Completed pages between two progress log lines
const PROGRESS_INTERVAL: usize = 50;

/// What happened to a link offered to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// Queued for fetching
    Admitted,
    /// Not a usable http(s) URL
    Rejected(UrlError),
    /// Outside the seed's host (or registrable domain)
    OutOfScope,
    /// Disallowed for our token by robots.txt
    RobotsDenied,
    /// Already admitted earlier in this run
    Duplicate,
    /// The page cap has been reached
    CapReached,
}

impl From<Admission> for EnqueueOutcome {
    fn from(admission: Admission) -> Self {
        match admission {
            Admission::Admitted => Self::Admitted,
            Admission::Duplicate => Self::Duplicate,
            Admission::CapReached => Self::CapReached,
        }
    }
}

/// Result of a finished crawl
///
/// Serializes directly as the `urls.json` document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,

    /// Normalized seed URL
    pub start: String,

    /// Number of entries in `urls`
    pub count: usize,

    /// Every admitted URL, in discovery order
    pub urls: Vec<String>,

    /// One record per fetched URL, in completion order
    pub details: Vec<PageRecord>,

    /// Wall time from session start to report
    #[serde(skip)]
    pub elapsed: Duration,
}

/// All state of one crawl run
///
/// Built once per invocation and shared by every worker slot behind an `Arc`.
/// The frontier and the result list are the only mutable parts.
pub struct CrawlSession {
    config: CrawlConfig,
    client: Client,
    robots: RobotsPolicy,
    scope: ScopeFilter,
    frontier: Frontier,
    records: Mutex<Vec<PageRecord>>,
    delay: Duration,
    started: Instant,
}

impl CrawlSession {
    /// Creates a session for the given configuration
    ///
    /// Builds the HTTP client and fetches robots.txt for the seed's origin.
    /// An unreachable or missing robots.txt allows everything; only a client
    /// that cannot be built or a seed without a host is fatal.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Ready to accept the seed
    /// * `Err(SitewalkError)` - Failed to initialize
    pub async fn start(config: CrawlConfig) -> Result<Self, SitewalkError> {
        let client = build_http_client(&config.user_agent, &config.http)?;
        let scope = ScopeFilter::from_seed(&config.start, config.allow_subdomains)?;

        let robots = fetch_robots(&client, &config.start, config.http.robots_timeout()).await;
        let crawl_delay = robots.crawl_delay(config.user_agent.robots_token());
        let delay = effective_delay(config.delay(), crawl_delay);

        if let Some(secs) = crawl_delay {
            tracing::info!(
                "robots.txt requests Crawl-delay {}s, using {:?} between requests per slot",
                secs,
                delay
            );
        }

        tracing::info!(
            "Crawling {} (host: {}, subdomains: {}, max: {}, concurrency: {}, delay: {:?})",
            config.start,
            scope.host(),
            scope.allows_subdomains(),
            config.max_pages,
            config.concurrency,
            delay
        );

        Ok(Self {
            frontier: Frontier::new(config.max_pages),
            records: Mutex::new(Vec::new()),
            config,
            client,
            robots,
            scope,
            delay,
            started: Instant::now(),
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Delay between two dispatches of one worker slot
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Offers a link for crawling
    ///
    /// `raw` is resolved against `base` when given, then normalized, scoped,
    /// robots-checked and finally admitted to the frontier. Every outcome but
    /// [`EnqueueOutcome::Admitted`] is a silent drop.
    pub fn enqueue(&self, raw: &str, base: Option<&Url>) -> EnqueueOutcome {
        let url = match normalize_url(raw, base) {
            Ok(url) => url,
            Err(e) => {
                tracing::trace!("Dropping link {:?}: {}", raw, e);
                return EnqueueOutcome::Rejected(e);
            }
        };

        if !self.scope.contains(&url) {
            tracing::trace!("Out of scope: {}", url);
            return EnqueueOutcome::OutOfScope;
        }

        // Skips the robots match for links seen before; admit() re-checks
        if self.frontier.contains(&url) {
            return EnqueueOutcome::Duplicate;
        }

        if !self
            .robots
            .is_allowed(url.as_str(), self.config.user_agent.robots_token())
        {
            tracing::debug!("Disallowed by robots.txt: {}", url);
            return EnqueueOutcome::RobotsDenied;
        }

        let outcome = EnqueueOutcome::from(self.frontier.admit(url));
        if outcome == EnqueueOutcome::CapReached {
            tracing::trace!("Page cap of {} reached", self.frontier.max_pages());
        }
        outcome
    }

    /// Fetches one dispatched URL, records the result and admits its links
    pub async fn process(&self, url: Url) {
        tracing::debug!("Fetching {}", url);

        let record = match fetch_url(&self.client, &url).await {
            FetchResult::Html {
                final_url,
                status_code,
                content_type,
                body,
            } => {
                let page = parse_html(&body);

                let admitted = page
                    .links
                    .iter()
                    .filter(|href| self.enqueue(href, Some(&final_url)) == EnqueueOutcome::Admitted)
                    .count();

                tracing::trace!(
                    "{}: {} links, {} new",
                    url,
                    page.links.len(),
                    admitted
                );

                PageRecord::success(url.as_str(), status_code, Some(content_type), page.title)
            }
            FetchResult::Redirect {
                status_code,
                location,
            } => {
                // The target goes through the same admission as a link
                let target = location.map(|raw| {
                    let outcome = self.enqueue(&raw, Some(&url));
                    tracing::debug!("{} redirects to {:?}: {:?}", url, raw, outcome);
                    normalize_url(&raw, Some(&url)).map_or(raw, String::from)
                });
                PageRecord::redirect(url.as_str(), status_code, target)
            }
            FetchResult::NonHtml {
                status_code,
                content_type,
            } => {
                tracing::debug!(
                    "Not HTML ({}): {}",
                    content_type.as_deref().unwrap_or("no content type"),
                    url
                );
                PageRecord::success(url.as_str(), status_code, content_type, None)
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("HTTP {} for {}", status_code, url);
                PageRecord::failure(
                    url.as_str(),
                    Some(status_code),
                    format!("HTTP {}", status_code),
                )
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                PageRecord::failure(url.as_str(), None, error)
            }
        };

        self.record(record);
    }

    fn record(&self, record: PageRecord) {
        let completed = {
            let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
            records.push(record);
            records.len()
        };

        if completed % PROGRESS_INTERVAL == 0 {
            let elapsed = self.started.elapsed();
            tracing::info!(
                "Progress: {} pages fetched, {} discovered, {} queued, {:.2} pages/sec",
                completed,
                self.frontier.visited_len(),
                self.frontier.queued_len(),
                completed as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
            );
        }
    }

    /// Snapshot of the results so far
    pub fn report(&self) -> CrawlReport {
        let urls = self.frontier.discovered();
        let details = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        CrawlReport {
            generated_at: Utc::now(),
            start: self.config.start.to_string(),
            count: urls.len(),
            urls,
            details,
            elapsed: self.started.elapsed(),
        }
    }
}

/// Runs a complete crawl from the configured seed
///
/// Returns once the frontier is idle: the queue is empty and no fetch is in
/// flight. Per-page failures end up in the report, never in the `Err` arm.
pub async fn run_crawl(config: CrawlConfig) -> Result<CrawlReport, SitewalkError> {
    let concurrency = config.concurrency;
    let session = Arc::new(CrawlSession::start(config).await?);

    let seed = session.config().start.clone();
    match session.enqueue(seed.as_str(), None) {
        EnqueueOutcome::Admitted => {}
        outcome => tracing::warn!("Seed {} was not queued: {:?}", seed, outcome),
    }

    Scheduler::new(Arc::clone(&session), concurrency).run().await;

    let report = session.report();
    tracing::info!(
        "Crawl completed: {} URLs discovered, {} pages fetched in {:?}",
        report.count,
        report.details.len(),
        report.elapsed
    );

    Ok(report)
}
