use crate::config::types::{CrawlConfig, HttpConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on worker slots
const MAX_CONCURRENCY: usize = 100;

/// Validates the entire configuration
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_crawler_limits(config)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates crawl limits
fn validate_crawler_limits(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.start.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            config.start
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens/underscores only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

/// Validates HTTP timeouts
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("request-timeout", config.request_timeout_secs),
        ("connect-timeout", config.connect_timeout_secs),
        ("robots-timeout", config.robots_timeout_secs),
    ] {
        if value < 1 {
            return Err(ConfigError::Validation(format!(
                "{} must be >= 1 second, got {}",
                name, value
            )));
        }
    }

    Ok(())
}
