//! Sitewalk main entry point
//!
//! This is the command-line interface for the Sitewalk site crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sitewalk::config::{
    load_config_with_hash, resolve_config, ChangeFreq, CliOverrides, CrawlConfig, FileConfig,
};
use sitewalk::crawler::crawl;
use sitewalk::output::{log_statistics, write_outputs, CrawlStatistics};
use tracing_subscriber::EnvFilter;

/// Sitewalk: a polite single-site crawler
///
/// Sitewalk discovers every same-site URL reachable from a seed page while
/// respecting robots.txt and a politeness delay, then writes the URL set as
/// urls.json, urls.csv and sitemap.xml.
#[derive(Parser, Debug)]
#[command(name = "sitewalk")]
#[command(version)]
#[command(about = "A polite single-site crawler", long_about = None)]
struct Cli {
    /// Seed URL [default: https://example.com/]
    #[arg(long, value_name = "URL")]
    start: Option<String>,

    /// Output directory [default: ./data]
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Maximum number of URLs to discover [default: 20000]
    #[arg(long, value_name = "N")]
    max: Option<usize>,

    /// Maximum concurrent fetches [default: 5]
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Delay between requests of one worker, in milliseconds [default: 300]
    #[arg(long, value_name = "MS")]
    delay: Option<u64>,

    /// Also crawl subdomains of the seed's domain [default: false]
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    subdomains: Option<bool>,

    /// Add <changefreq> to every sitemap entry
    #[arg(long, value_name = "FREQ", value_enum)]
    changefreq: Option<ChangeFreq>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            start: self.start.clone(),
            out: self.out.clone(),
            max: self.max,
            concurrency: self.concurrency,
            delay: self.delay,
            subdomains: self.subdomains,
            changefreq: self.changefreq,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (file_config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            file_config
        }
        None => FileConfig::default(),
    };

    let config = resolve_config(file_config, cli.overrides()).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitewalk=info,warn"),
            1 => EnvFilter::new("sitewalk=debug,info"),
            2 => EnvFilter::new("sitewalk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &CrawlConfig) {
    println!("=== Sitewalk Dry Run ===\n");

    println!("Crawl:");
    println!("  Start: {}", config.start);
    println!("  Max pages: {}", config.max_pages);
    println!("  Concurrency: {}", config.concurrency);
    println!("  Delay: {}ms", config.delay_ms);
    println!("  Subdomains: {}", config.allow_subdomains);

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.header());
    println!("  robots.txt token: {}", config.user_agent.robots_token());

    println!("\nHTTP:");
    println!("  Request timeout: {}s", config.http.request_timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);
    println!("  robots.txt timeout: {}s", config.http.robots_timeout_secs);

    println!("\nOutput:");
    println!("  Directory: {}", config.out_dir.display());
    println!(
        "  Sitemap changefreq: {}",
        config.changefreq.map_or("none", |f| f.as_str())
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: CrawlConfig) -> anyhow::Result<()> {
    let out_dir = config.out_dir.clone();
    let changefreq = config.changefreq;

    let report = match crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).context("Crawl could not start");
        }
    };

    log_statistics(&CrawlStatistics::from_report(&report));

    let written = write_outputs(&report, &out_dir, changefreq)
        .with_context(|| format!("Failed to write output to {}", out_dir.display()))?;

    println!(
        "✓ {} URLs written to {} ({} files)",
        report.count,
        out_dir.display(),
        written.len()
    );

    Ok(())
}
