//! Robots.txt handling module
//!
//! This module provides functionality for fetching and parsing the seed host's
//! robots.txt. The file is loaded exactly once per run, before the first page
//! fetch, and is read-only afterwards.

mod parser;

pub use parser::RobotsPolicy;

use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Fetches robots.txt for the seed's origin
///
/// Retrieval is fail-open: a network error, timeout, non-200 response, or an
/// unreadable body all yield [`RobotsPolicy::allow_all`] and a warning. A crawl
/// never aborts because robots.txt is missing.
///
/// # Arguments
///
/// * `client` - The shared HTTP client (carries the user agent header)
/// * `seed` - The crawl's seed URL; only its origin is used
/// * `timeout` - Upper bound on the whole robots.txt request
pub async fn fetch_robots(client: &Client, seed: &Url, timeout: Duration) -> RobotsPolicy {
    let robots_url = match seed.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot build robots.txt URL for {}: {}", seed, e);
            return RobotsPolicy::allow_all();
        }
    };

    tracing::debug!("Fetching {}", robots_url);

    let response = match client.get(robots_url.clone()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                "robots.txt unreachable at {} ({}), allowing all URLs",
                robots_url,
                e
            );
            return RobotsPolicy::allow_all();
        }
    };

    if response.status() != StatusCode::OK {
        tracing::warn!(
            "robots.txt at {} returned HTTP {}, allowing all URLs",
            robots_url,
            response.status().as_u16()
        );
        return RobotsPolicy::allow_all();
    }

    match response.text().await {
        Ok(body) => {
            tracing::info!("Loaded robots.txt from {} ({} bytes)", robots_url, body.len());
            RobotsPolicy::from_content(&body)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to read robots.txt body from {} ({}), allowing all URLs",
                robots_url,
                e
            );
            RobotsPolicy::allow_all()
        }
    }
}
