//! Configuration module for Sitewalk
//!
//! Run parameters come from three layers, highest precedence first: command
//! line flags, an optional TOML file, and built-in defaults. The result is an
//! immutable [`CrawlConfig`] validated before the crawl starts.
//!
//! # Example
//!
//! ```no_run
//! use sitewalk::config::{load_config, resolve_config, CliOverrides};
//! use std::path::Path;
//!
//! let file = load_config(Path::new("sitewalk.toml")).unwrap();
//! let config = resolve_config(file, CliOverrides::default()).unwrap();
//! println!("Crawling from {}", config.start);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ChangeFreq, CliOverrides, CrawlConfig, CrawlerSection, FileConfig, HttpConfig, HttpSection,
    OutputSection, UserAgentConfig, UserAgentSection, DEFAULT_CONCURRENCY, DEFAULT_DELAY_MS,
    DEFAULT_MAX_PAGES, DEFAULT_OUT_DIR, DEFAULT_START_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, resolve_config};
pub use validation::validate;
