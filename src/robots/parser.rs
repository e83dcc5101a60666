//! Robots.txt parser implementation
//!
//! This module provides functionality for parsing robots.txt content using the robotstxt crate.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt rules for the crawl's seed host
///
/// This is a wrapper around the robotstxt crate's matcher, providing a
/// simplified interface for checking if URLs are allowed. A policy built with
/// [`RobotsPolicy::allow_all`] is what the crawl falls back to when the file
/// cannot be fetched.
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// Whether to allow all (true = allow all, false = parse content)
    allow_all: bool,
}

impl RobotsPolicy {
    /// Creates a new RobotsPolicy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive RobotsPolicy that allows everything
    ///
    /// This is used as the default when robots.txt cannot be fetched or parsed.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Returns true if this policy is the fail-open fallback
    pub fn is_allow_all(&self) -> bool {
        self.allow_all
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The URL, absolute or as a path (e.g., "/page.html")
    /// * `user_agent` - The product token robots groups are keyed by
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Gets the crawl delay for a specific user agent
    ///
    /// A group naming the agent wins over the `*` group.
    ///
    /// # Returns
    ///
    /// * `Some(f64)` - The crawl delay in seconds
    /// * `None` - If no crawl delay is specified
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        if self.allow_all || self.content.is_empty() {
            return None;
        }

        let mut current_user_agents: Vec<String> = Vec::new();
        let mut in_group_body = false;
        let mut crawl_delay_for_wildcard: Option<f64> = None;
        let mut crawl_delay_for_agent: Option<f64> = None;

        let normalized_agent = user_agent.to_lowercase();

        for line in self.content.lines() {
            // Strip trailing comments
            let trimmed = line.split('#').next().unwrap_or("").trim();
            if trimmed.is_empty() {
                continue;
            }

            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // Consecutive User-agent lines share one group
                    if in_group_body {
                        current_user_agents.clear();
                        in_group_body = false;
                    }
                    current_user_agents.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    in_group_body = true;
                    let Ok(delay) = value.parse::<f64>() else {
                        continue;
                    };
                    if current_user_agents.iter().any(|ua| ua == "*") {
                        crawl_delay_for_wildcard.get_or_insert(delay);
                    }
                    if current_user_agents
                        .iter()
                        .any(|ua| ua != "*" && normalized_agent == *ua)
                    {
                        crawl_delay_for_agent.get_or_insert(delay);
                    }
                }
                _ => in_group_body = true,
            }
        }

        crawl_delay_for_agent.or(crawl_delay_for_wildcard)
    }
}
