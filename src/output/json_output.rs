use crate::crawler::CrawlReport;
use crate::output::traits::{OutputResult, OutputWriter};
use std::io::Write;

/// Writes `urls.json`: `{generatedAt, start, count, urls, details}`
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonOutput;

impl OutputWriter for JsonOutput {
    fn file_name(&self) -> &'static str {
        "urls.json"
    }

    fn write(&self, report: &CrawlReport, out: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PageRecord;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::time::Duration;

    fn sample_report() -> CrawlReport {
        CrawlReport {
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            start: "https://example.test/".to_string(),
            count: 3,
            urls: vec![
                "https://example.test/".to_string(),
                "https://example.test/a".to_string(),
                "https://example.test/missing".to_string(),
            ],
            details: vec![
                PageRecord::success(
                    "https://example.test/",
                    200,
                    Some("text/html".to_string()),
                    Some("Home".to_string()),
                ),
                PageRecord::success("https://example.test/a", 200, None, None),
                PageRecord::failure("https://example.test/missing", Some(404), "HTTP 404"),
            ],
            elapsed: Duration::from_secs(3),
        }
    }

    #[test]
    fn test_json_document_shape() {
        let mut buf = Vec::new();
        JsonOutput.write(&sample_report(), &mut buf).unwrap();
        let doc: Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(doc["generatedAt"], "2024-05-01T12:00:00Z");
        assert_eq!(doc["start"], "https://example.test/");
        assert_eq!(doc["count"], 3);
        assert_eq!(doc["urls"].as_array().unwrap().len(), 3);
        assert!(doc.get("elapsed").is_none());

        assert_eq!(
            doc["details"][0],
            json!({"url": "https://example.test/", "status": 200, "contentType": "text/html", "title": "Home"})
        );
        assert_eq!(
            doc["details"][1],
            json!({"url": "https://example.test/a", "status": 200})
        );
        assert_eq!(
            doc["details"][2],
            json!({"url": "https://example.test/missing", "status": 404, "error": "HTTP 404"})
        );
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let mut buf = Vec::new();
        JsonOutput.write(&sample_report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("{\n  \"generatedAt\""));
        assert!(text.ends_with("}\n"));
    }
}
