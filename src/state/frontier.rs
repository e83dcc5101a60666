//! Frontier queue and visited set
//!
//! The frontier owns the only dedup state of a crawl: the set of normalized
//! URLs ever admitted, the queue of admitted URLs not yet dispatched, and the
//! count of dispatched URLs not yet completed. All three change together under
//! one lock, so two concurrent admissions can never both accept the same URL.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use url::Url;

/// Result of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Added to the visited set and the work queue
    Admitted,
    /// Already admitted earlier in this run
    Duplicate,
    /// The visited set is at the page cap
    CapReached,
}

#[derive(Debug, Default)]
struct FrontierState {
    /// Every URL ever admitted; never shrinks
    visited: HashSet<String>,
    /// Admitted URLs in first-discovery order
    discovered: Vec<String>,
    /// Admitted URLs awaiting dispatch
    queue: VecDeque<Url>,
    /// Dispatched URLs whose processing has not completed
    in_flight: usize,
}

/// Bounded work queue plus the set of URLs already enqueued
#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    changed: Notify,
    max_pages: usize,
}

impl Frontier {
    /// Creates an empty frontier that admits at most `max_pages` URLs
    pub fn new(max_pages: usize) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            changed: Notify::new(),
            max_pages,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        // A panicking holder cannot leave the state half-updated: every
        // mutation below is a handful of infallible operations
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Offers a normalized URL for crawling
    ///
    /// Idempotent: a URL already admitted is a no-op, as is any URL once the
    /// visited set has reached the page cap.
    pub fn admit(&self, url: Url) -> Admission {
        let mut state = self.lock();

        if state.visited.contains(url.as_str()) {
            return Admission::Duplicate;
        }

        if state.visited.len() >= self.max_pages {
            return Admission::CapReached;
        }

        state.visited.insert(url.as_str().to_string());
        state.discovered.push(url.as_str().to_string());
        state.queue.push_back(url);
        drop(state);

        self.changed.notify_waiters();
        Admission::Admitted
    }

    /// Waits for the next URL to fetch
    ///
    /// Returns `None` once the frontier is idle: the queue is empty and no
    /// dispatched URL is still in flight (in-flight pages may yet admit new
    /// links, so an empty queue alone is not the end of the crawl).
    ///
    /// Every `Some` must be paired with exactly one [`Frontier::complete`].
    pub async fn next(&self) -> Option<Url> {
        loop {
            // Register interest before inspecting state so a notification
            // sent between the check and the await is not lost
            let notified = self.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if let Some(url) = state.queue.pop_front() {
                    state.in_flight += 1;
                    return Some(url);
                }
                if state.in_flight == 0 {
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Marks one dispatched URL as fully processed
    pub fn complete(&self) {
        let idle = {
            let mut state = self.lock();
            state.in_flight = state.in_flight.saturating_sub(1);
            state.in_flight == 0 && state.queue.is_empty()
        };

        if idle {
            tracing::trace!("Frontier is idle");
        }
        self.changed.notify_waiters();
    }

    /// Number of URLs admitted so far
    pub fn visited_len(&self) -> usize {
        self.lock().visited.len()
    }

    /// Number of URLs waiting for dispatch
    pub fn queued_len(&self) -> usize {
        self.lock().queue.len()
    }

    /// Number of URLs dispatched but not completed
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    /// Returns true if a URL has been admitted
    pub fn contains(&self, url: &Url) -> bool {
        self.lock().visited.contains(url.as_str())
    }

    /// Admitted URLs in first-discovery order
    pub fn discovered(&self) -> Vec<String> {
        self.lock().discovered.clone()
    }

    /// The configured page cap
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}

/// Pairs a dispatched URL with its completion
///
/// Dropping the guard calls [`Frontier::complete`], including while a worker
/// unwinds from a panic, so the idle signal always fires eventually.
pub struct InFlight<'a> {
    frontier: &'a Frontier,
}

impl<'a> InFlight<'a> {
    /// Takes responsibility for completing one dispatched URL
    pub fn new(frontier: &'a Frontier) -> Self {
        Self { frontier }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.frontier.complete();
    }
}
