use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Seed used when neither the command line nor the config file names one
pub const DEFAULT_START_URL: &str = "https://example.com/";

/// Default output directory
pub const DEFAULT_OUT_DIR: &str = "./data";

/// Default cap on the number of URLs admitted to the frontier
pub const DEFAULT_MAX_PAGES: usize = 20_000;

/// Default number of concurrent worker slots
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default politeness delay between dispatches of one worker slot (ms)
pub const DEFAULT_DELAY_MS: u64 = 300;

/// Immutable run parameters, resolved once at startup
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Normalized seed URL
    pub start: Url,

    /// Directory receiving urls.json, urls.csv and sitemap.xml
    pub out_dir: PathBuf,

    /// Maximum number of URLs admitted to the frontier
    pub max_pages: usize,

    /// Maximum number of concurrent fetches
    pub concurrency: usize,

    /// Minimum time between dispatches of one worker slot (milliseconds)
    pub delay_ms: u64,

    /// Whether subdomains of the seed's registrable domain are in scope
    pub allow_subdomains: bool,

    /// Optional `<changefreq>` written for every sitemap entry
    pub changefreq: Option<ChangeFreq>,

    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
}

impl CrawlConfig {
    /// Configured politeness delay
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentConfig {
    /// Name of the crawler; also the robots.txt product token
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn header(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }

    /// The token robots.txt groups are matched against
    pub fn robots_token(&self) -> &str {
        &self.crawler_name
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

/// HTTP timeouts (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    /// Total time allowed for one page request, including the body
    pub request_timeout_secs: u64,

    /// Time allowed to establish a connection
    pub connect_timeout_secs: u64,

    /// Total time allowed for the robots.txt request
    pub robots_timeout_secs: u64,
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn robots_timeout(&self) -> Duration {
        Duration::from_secs(self.robots_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 20,
            connect_timeout_secs: 10,
            robots_timeout_secs: 10,
        }
    }
}

/// Sitemap `<changefreq>` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// On-disk TOML configuration; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub crawler: CrawlerSection,
    #[serde(default)]
    pub user_agent: UserAgentSection,
    #[serde(default)]
    pub http: HttpSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// `[crawler]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CrawlerSection {
    pub start: Option<String>,
    pub max: Option<usize>,
    pub concurrency: Option<usize>,
    /// Milliseconds
    pub delay: Option<u64>,
    pub subdomains: Option<bool>,
}

/// `[user-agent]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct UserAgentSection {
    pub crawler_name: Option<String>,
    pub crawler_version: Option<String>,
    pub contact_url: Option<String>,
}

/// `[http]` section, all values in seconds
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HttpSection {
    pub request_timeout: Option<u64>,
    pub connect_timeout: Option<u64>,
    pub robots_timeout: Option<u64>,
}

/// `[output]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<PathBuf>,
    pub changefreq: Option<ChangeFreq>,
}

/// Values given on the command line; they win over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub start: Option<String>,
    pub out: Option<PathBuf>,
    pub max: Option<usize>,
    pub concurrency: Option<usize>,
    pub delay: Option<u64>,
    pub subdomains: Option<bool>,
    pub changefreq: Option<ChangeFreq>,
}
