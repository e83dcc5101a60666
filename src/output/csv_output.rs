use crate::crawler::CrawlReport;
use crate::output::traits::{OutputResult, OutputWriter};
use std::io::Write;

/// Writes `urls.csv`: a `url` header, then one URL per row in discovery order
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvOutput;

impl OutputWriter for CsvOutput {
    fn file_name(&self) -> &'static str {
        "urls.csv"
    }

    fn write(&self, report: &CrawlReport, out: &mut dyn Write) -> OutputResult<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(["url"])?;
        for url in &report.urls {
            writer.write_record([url])?;
        }
        writer.flush()?;
        Ok(())
    }
}
