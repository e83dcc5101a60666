//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building the shared HTTP client with the crawler's user agent
//! - GET requests with connect and total timeouts
//! - Redirect handling (only hops to the same normalized URL are followed)
//! - Content-Type classification (only HTML bodies are downloaded)
//! - Error classification into per-page failures

use crate::config::{HttpConfig, UserAgentConfig};
use crate::url::normalize_url;
use reqwest::{
    header::{CONTENT_TYPE, LOCATION},
    redirect::Policy,
    Client,
};
use url::Url;

/// Maximum redirect hops followed for one request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
///
/// None of these variants is fatal to the crawl; the coordinator turns each
/// into a [`crate::PageRecord`].
#[derive(Debug)]
pub enum FetchResult {
    /// A 2xx HTML response
    Html {
        /// Final URL after redirects; links on the page resolve against it
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// A 3xx response leading to a different page; not followed
    Redirect {
        status_code: u16,
        /// Raw `Location` header, relative to the requested URL
        location: Option<String>,
    },

    /// A 2xx response that is not HTML; the body is never read
    NonHtml {
        status_code: u16,
        content_type: Option<String>,
    },

    /// Non-2xx final status
    HttpError { status_code: u16 },

    /// Timeout, DNS failure, refused connection, or unreadable body
    NetworkError { error: String },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Timeouts applied to every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sitewalk::config::{HttpConfig, UserAgentConfig};
/// use sitewalk::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header())
        .timeout(http.request_timeout())
        .connect_timeout(http.connect_timeout())
        .redirect(redirect_policy())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Follows a redirect only while it stays on the requested page
///
/// A hop whose target normalizes to the same URL as the original request
/// (`/docs` to `/docs/`, for instance) is followed. Any other redirect stops
/// here and comes back as a 3xx response, so its target has to go through
/// scope, robots and dedup like any other link.
fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }

        let same_page = attempt
            .previous()
            .first()
            .map_or(false, |origin| same_normalized_url(origin, attempt.url()));

        if same_page {
            attempt.follow()
        } else {
            attempt.stop()
        }
    })
}

fn same_normalized_url(a: &Url, b: &Url) -> bool {
    match (normalize_url(a.as_str(), None), normalize_url(b.as_str(), None)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Returns true if a Content-Type header denotes an HTML document
pub fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

/// Fetches a URL once, without retries
///
/// # Request Flow
///
/// 1. Send GET request (same-page redirects followed up to 10 hops)
/// 2. 3xx status → Redirect with the Location header
/// 3. Other non-2xx status → HttpError
/// 4. Non-HTML Content-Type → NonHtml, body discarded
/// 5. Read body → Html
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult indicating success or the type of failure
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    let final_url = response.url().clone();

    if status.is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        return FetchResult::Redirect {
            status_code: status.as_u16(),
            location,
        };
    }

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let content_type = match content_type {
        Some(ct) if is_html(&ct) => ct,
        other => {
            return FetchResult::NonHtml {
                status_code: status.as_u16(),
                content_type: other,
            }
        }
    };

    match response.text().await {
        Ok(body) => FetchResult::Html {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => classify_error(&e),
    }
}

/// Maps a transport error to a per-page failure message
fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        format!("Redirect error: {}", e)
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
