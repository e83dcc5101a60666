//! XML sitemap writer
//!
//! Produces a sitemaps.org `urlset` with one `<url>` per discovered URL.
//! Only `<loc>` and, when configured, `<changefreq>` are emitted. Escaping
//! and the XML declaration are left to the `sitemap` crate's writer.

use crate::config::ChangeFreq;
use crate::crawler::CrawlReport;
use crate::output::traits::{OutputError, OutputResult, OutputWriter};
use sitemap::structs::{self, UrlEntry};
use sitemap::writer::SiteMapWriter;
use std::io::Write;

/// Namespace of the sitemap protocol
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Writes `sitemap.xml`
#[derive(Debug, Default, Clone, Copy)]
pub struct SitemapOutput {
    changefreq: Option<ChangeFreq>,
}

impl SitemapOutput {
    /// Creates a writer that tags every entry with `changefreq`, if given
    pub fn new(changefreq: Option<ChangeFreq>) -> Self {
        Self { changefreq }
    }

    fn entry(&self, url: &str) -> OutputResult<UrlEntry> {
        let mut builder = UrlEntry::builder().loc(url);
        if let Some(freq) = self.changefreq {
            builder = builder.changefreq(freq.into());
        }
        builder.build().map_err(sitemap_error)
    }
}

impl From<ChangeFreq> for structs::ChangeFreq {
    fn from(freq: ChangeFreq) -> Self {
        match freq {
            ChangeFreq::Always => Self::Always,
            ChangeFreq::Hourly => Self::Hourly,
            ChangeFreq::Daily => Self::Daily,
            ChangeFreq::Weekly => Self::Weekly,
            ChangeFreq::Monthly => Self::Monthly,
            ChangeFreq::Yearly => Self::Yearly,
            ChangeFreq::Never => Self::Never,
        }
    }
}

fn sitemap_error(e: sitemap::Error) -> OutputError {
    OutputError::Sitemap(format!("{:?}", e))
}

impl OutputWriter for SitemapOutput {
    fn file_name(&self) -> &'static str {
        "sitemap.xml"
    }

    fn write(&self, report: &CrawlReport, out: &mut dyn Write) -> OutputResult<()> {
        let mut urlset = SiteMapWriter::new(&mut *out)
            .start_urlset()
            .map_err(sitemap_error)?;

        for url in &report.urls {
            urlset.url(self.entry(url)?).map_err(sitemap_error)?;
        }

        urlset.end().map_err(sitemap_error)?;
        writeln!(out)?;
        Ok(())
    }
}
