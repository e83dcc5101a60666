use url::{Host, Url};

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitewalk::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.TEST/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.test".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Reduces a URL's host to its registrable domain (last two labels)
///
/// `a.y.com` and `x.y.com` both reduce to `y.com`. This heuristic does not
/// consult a public-suffix list, so hosts under multi-part suffixes such as
/// `co.uk` all reduce to the suffix itself and compare equal. IP-address hosts
/// reduce to themselves.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitewalk::url::registrable_domain;
///
/// let url = Url::parse("https://blog.example.test/").unwrap();
/// assert_eq!(registrable_domain(&url), Some("example.test".to_string()));
/// ```
pub fn registrable_domain(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.to_lowercase();
            let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();
            let start = labels.len().saturating_sub(2);
            Some(labels[start..].join("."))
        }
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
    }
}
