use crate::config::types::{
    CliOverrides, CrawlConfig, FileConfig, HttpConfig, UserAgentConfig, DEFAULT_CONCURRENCY,
    DEFAULT_DELAY_MS, DEFAULT_MAX_PAGES, DEFAULT_OUT_DIR, DEFAULT_START_URL,
};
use crate::config::validation::validate;
use crate::url::normalize_url;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(FileConfig)` - Successfully loaded configuration
/// * `Err(ConfigError)` - Failed to read or parse the configuration
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a run's output can be tied back to the file that
/// produced it.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(FileConfig, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Resolves the run configuration
///
/// Each value comes from the command line if given, else the config file,
/// else the built-in default. The seed URL is normalized here, so an
/// unusable seed is rejected before anything touches the network.
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Validated, immutable run parameters
/// * `Err(ConfigError)` - Invalid seed URL or out-of-range values
pub fn resolve_config(file: FileConfig, cli: CliOverrides) -> Result<CrawlConfig, ConfigError> {
    let start_raw = cli
        .start
        .or(file.crawler.start)
        .unwrap_or_else(|| DEFAULT_START_URL.to_string());

    let start = normalize_url(&start_raw, None)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", start_raw, e)))?;

    let user_agent_defaults = UserAgentConfig::default();
    let user_agent = UserAgentConfig {
        crawler_name: file
            .user_agent
            .crawler_name
            .unwrap_or(user_agent_defaults.crawler_name),
        crawler_version: file
            .user_agent
            .crawler_version
            .unwrap_or(user_agent_defaults.crawler_version),
        contact_url: file.user_agent.contact_url,
    };

    let http_defaults = HttpConfig::default();
    let http = HttpConfig {
        request_timeout_secs: file
            .http
            .request_timeout
            .unwrap_or(http_defaults.request_timeout_secs),
        connect_timeout_secs: file
            .http
            .connect_timeout
            .unwrap_or(http_defaults.connect_timeout_secs),
        robots_timeout_secs: file
            .http
            .robots_timeout
            .unwrap_or(http_defaults.robots_timeout_secs),
    };

    let config = CrawlConfig {
        start,
        out_dir: cli
            .out
            .or(file.output.dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
        max_pages: cli.max.or(file.crawler.max).unwrap_or(DEFAULT_MAX_PAGES),
        concurrency: cli
            .concurrency
            .or(file.crawler.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY),
        delay_ms: cli.delay.or(file.crawler.delay).unwrap_or(DEFAULT_DELAY_MS),
        allow_subdomains: cli.subdomains.or(file.crawler.subdomains).unwrap_or(false),
        changefreq: cli.changefreq.or(file.output.changefreq),
        user_agent,
        http,
    };

    validate(&config)?;

    Ok(config)
}
