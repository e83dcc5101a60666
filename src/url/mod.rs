//! URL handling module for Sitewalk
//!
//! This module provides URL normalization, domain extraction, and the scope
//! filter that keeps a crawl on its target site.

mod domain;
mod normalize;
mod scope;

// Re-export main functions
pub use domain::{extract_domain, registrable_domain};
pub use normalize::normalize_url;
pub use scope::ScopeFilter;
