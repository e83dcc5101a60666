use crate::url::domain::{extract_domain, registrable_domain};
use crate::UrlError;
use url::Url;

/// Decides which hosts belong to the crawl's target site
///
/// Scope is fixed at startup from the seed URL:
/// 1. Exact host match is always in scope
/// 2. With subdomains allowed, any host sharing the seed's registrable domain
///    (see [`registrable_domain`]) is in scope
///
/// Scheme and port are not part of scope; `http://site` and `https://site`
/// are the same target site. Every port on the seed's host is in scope, and
/// all of them are governed by the robots.txt fetched from the seed's origin.
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    host: String,
    registrable: String,
    allow_subdomains: bool,
}

impl ScopeFilter {
    /// Builds the scope for a crawl seeded at `seed`
    ///
    /// # Returns
    ///
    /// * `Ok(ScopeFilter)` - Scope bound to the seed's host
    /// * `Err(UrlError::MissingDomain)` - The seed has no host
    pub fn from_seed(seed: &Url, allow_subdomains: bool) -> Result<Self, UrlError> {
        let host = extract_domain(seed).ok_or(UrlError::MissingDomain)?;
        let registrable = registrable_domain(seed).ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            host,
            registrable,
            allow_subdomains,
        })
    }

    /// Returns whether a normalized candidate URL is in scope
    pub fn contains(&self, candidate: &Url) -> bool {
        let Some(host) = extract_domain(candidate) else {
            return false;
        };

        if host == self.host {
            return true;
        }

        self.allow_subdomains
            && registrable_domain(candidate).as_deref() == Some(self.registrable.as_str())
    }

    /// The seed's host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether subdomains of the registrable domain are in scope
    pub fn allows_subdomains(&self) -> bool {
        self.allow_subdomains
    }
}
