use crate::UrlError;
use url::Url;

/// Normalizes a URL according to Sitewalk's canonicalization rules
///
/// The canonical string is the crawl's only deduplication key: two inputs
/// that normalize to the same URL are the same frontier node.
///
/// # Normalization Steps
///
/// 1. Resolve against `base` (the page the link appeared on), if given
/// 2. Remove fragment (everything after #)
/// 3. Drop default ports (80 for http, 443 for https)
/// 4. Normalize path:
///    - Empty path becomes /
///    - Remove trailing slash (except for root /)
/// 5. Reject anything that is not http or https (`mailto:`, `tel:`,
///    `javascript:`, `data:`, ...)
///
/// Host lowercasing and dot-segment removal come from the URL parser itself.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize, absolute or relative
/// * `base` - The URL of the page containing the link, for relative input
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse the URL, or it is not crawlable
///
/// # Examples
///
/// ```
/// use sitewalk::url::normalize_url;
///
/// let url = normalize_url("http://EXAMPLE.test:80/page/#top", None).unwrap();
/// assert_eq!(url.as_str(), "http://example.test/page");
/// ```
pub fn normalize_url(raw: &str, base: Option<&Url>) -> Result<Url, UrlError> {
    let raw = raw.trim();

    // Step 1: Parse, resolving relative references against the page URL
    let mut url = match base {
        Some(base) => base.join(raw),
        None => Url::parse(raw),
    }
    .map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    // Step 5 is checked early: nothing below applies to opaque schemes
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    // Step 2: Remove fragment
    url.set_fragment(None);

    // Step 3: The parser already elides a port equal to the scheme default,
    // this covers URLs built by other means
    if url.port().is_some() && url.port() == default_port(url.scheme()) {
        let _ = url.set_port(None);
    }

    // Step 4: Normalize path
    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    Ok(url)
}

/// Returns the well-known port for a crawlable scheme
fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

/// Strips trailing slashes from a non-root path; empty becomes root
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
