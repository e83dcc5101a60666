//! Worker slots and politeness delay
//!
//! This module handles:
//! - Running a fixed number of worker slots against the shared frontier
//! - Spacing each slot's dispatches by the effective delay
//! - Integrating the robots.txt crawl delay
//! - Surviving worker panics without stalling the crawl

use crate::crawler::coordinator::CrawlSession;
use crate::state::InFlight;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};

/// Longest Crawl-delay we honor; anything above is treated as this
const MAX_CRAWL_DELAY: Duration = Duration::from_secs(60);

/// Calculates the delay between two dispatches of one slot
///
/// Takes the larger of the configured delay and the robots.txt crawl delay.
/// Negative or non-finite crawl delays are ignored.
///
/// # Arguments
///
/// * `configured` - The delay from the run configuration
/// * `crawl_delay` - Optional Crawl-delay from robots.txt (in seconds)
pub fn effective_delay(configured: Duration, crawl_delay: Option<f64>) -> Duration {
    let robots_delay = crawl_delay
        .filter(|secs| secs.is_finite())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .map(|d| d.min(MAX_CRAWL_DELAY))
        .unwrap_or(Duration::ZERO);

    configured.max(robots_delay)
}

/// Runs the worker slots of one crawl
///
/// Each slot takes a URL from the frontier, waits out its own politeness
/// delay, fetches and processes the page, and repeats until the frontier
/// reports idle. At most `concurrency` fetches are therefore in flight.
pub struct Scheduler {
    session: Arc<CrawlSession>,
    concurrency: usize,
}

impl Scheduler {
    pub fn new(session: Arc<CrawlSession>, concurrency: usize) -> Self {
        Self {
            session,
            concurrency: concurrency.max(1),
        }
    }

    /// Runs every slot to completion
    pub async fn run(self) {
        let mut workers = JoinSet::new();
        for slot in 0..self.concurrency {
            workers.spawn(run_slot(slot, Arc::clone(&self.session)));
        }

        while let Some(result) = workers.join_next().await {
            match result {
                Ok((slot, dispatched)) => {
                    tracing::debug!("Slot {} finished after {} pages", slot, dispatched);
                }
                Err(e) if e.is_panic() => {
                    tracing::error!("Worker panicked: {}", e);
                }
                Err(e) => {
                    tracing::warn!("Worker cancelled: {}", e);
                }
            }
        }
    }
}

/// One worker slot; returns its index and how many URLs it dispatched
async fn run_slot(slot: usize, session: Arc<CrawlSession>) -> (usize, usize) {
    let delay = session.delay();
    let mut last_dispatch: Option<Instant> = None;
    let mut dispatched = 0;

    while let Some(url) = session.frontier().next().await {
        let _in_flight = InFlight::new(session.frontier());

        if let Some(previous) = last_dispatch {
            sleep_until(previous + delay).await;
        }
        last_dispatch = Some(Instant::now());

        tracing::trace!("Slot {} dispatching {}", slot, url);
        session.process(url).await;
        dispatched += 1;
    }

    (slot, dispatched)
}
