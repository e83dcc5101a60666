//! Output module for writing crawl results
//!
//! This module handles:
//! - Writing the report as `urls.json`, `urls.csv` and `sitemap.xml`
//! - Summarizing and logging crawl statistics

mod csv_output;
mod json_output;
mod sitemap;
pub mod stats;
mod traits;

pub use csv_output::CsvOutput;
pub use json_output::JsonOutput;
pub use self::sitemap::{SitemapOutput, SITEMAP_NAMESPACE};
pub use stats::{log_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, OutputWriter};

use crate::config::ChangeFreq;
use crate::crawler::CrawlReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes every output file for a report
///
/// Creates `dir` if needed. An empty report still produces all three files.
///
/// # Arguments
///
/// * `report` - The finished crawl
/// * `dir` - Output directory
/// * `changefreq` - Optional `<changefreq>` for sitemap entries
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the written files
/// * `Err(OutputError)` - A file could not be created or written
pub fn write_outputs(
    report: &CrawlReport,
    dir: &Path,
    changefreq: Option<ChangeFreq>,
) -> OutputResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::Write {
        file: dir.display().to_string(),
        source,
    })?;

    let sitemap = SitemapOutput::new(changefreq);
    let writers: [&dyn OutputWriter; 3] = [&JsonOutput, &CsvOutput, &sitemap];

    let mut written = Vec::with_capacity(writers.len());
    for writer in writers {
        let path = dir.join(writer.file_name());
        write_file(writer, report, &path)?;
        tracing::info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn write_file(writer: &dyn OutputWriter, report: &CrawlReport, path: &Path) -> OutputResult<()> {
    let io_error = |source| OutputError::Write {
        file: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut out = BufWriter::new(file);
    writer.write(report, &mut out)?;
    out.flush().map_err(io_error)?;
    Ok(())
}
