//! Page records produced by the crawl
//!
//! One record is appended per URL the crawl attempted to fetch. Records are
//! never mutated once created.

use serde::Serialize;

/// The result of processing one URL
///
/// Serializes flat, e.g. `{"url": "...", "status": 200, "title": "..."}` or
/// `{"url": "...", "status": 404, "error": "HTTP 404"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// The normalized URL that was requested
    pub url: String,

    /// What happened when it was fetched
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

/// Outcome of a single fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageOutcome {
    /// A 2xx response. Only HTML responses carry a title.
    #[serde(rename_all = "camelCase")]
    Success {
        status: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        content_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },

    /// A 3xx response that was not followed. `location` is the resolved
    /// target, which is offered to the frontier like any other link.
    Redirect {
        status: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },

    /// A failed fetch: HTTP error status, timeout, DNS or connection failure,
    /// or an unreadable body
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        #[serde(rename = "error")]
        message: String,
    },
}

impl PageRecord {
    /// Creates a record for a successful fetch
    pub fn success(
        url: impl Into<String>,
        status: u16,
        content_type: Option<String>,
        title: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            outcome: PageOutcome::Success {
                status,
                content_type,
                title,
            },
        }
    }

    /// Creates a record for a failed fetch
    pub fn failure(url: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: PageOutcome::Error {
                status,
                message: message.into(),
            },
        }
    }

    /// Creates a record for a redirect response
    pub fn redirect(url: impl Into<String>, status: u16, location: Option<String>) -> Self {
        Self {
            url: url.into(),
            outcome: PageOutcome::Redirect { status, location },
        }
    }

    /// Returns true if the fetch succeeded
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, PageOutcome::Success { .. })
    }

    /// HTTP status, if a response was received
    pub fn status(&self) -> Option<u16> {
        match &self.outcome {
            PageOutcome::Success { status, .. } | PageOutcome::Redirect { status, .. } => {
                Some(*status)
            }
            PageOutcome::Error { status, .. } => *status,
        }
    }

    /// Page title (successful HTML pages only)
    pub fn title(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Success { title, .. } => title.as_deref(),
            _ => None,
        }
    }

    /// Content-Type header of a successful response
    pub fn content_type(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Success { content_type, .. } => content_type.as_deref(),
            _ => None,
        }
    }

    /// Error message of a failed fetch
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns true if the response was a 3xx
    pub fn is_redirect(&self) -> bool {
        matches!(self.outcome, PageOutcome::Redirect { .. })
    }

    /// Redirect target of a 3xx response
    pub fn location(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Redirect { location, .. } => location.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_accessors() {
        let record = PageRecord::success(
            "https://example.test/",
            200,
            Some("text/html".to_string()),
            Some("Home".to_string()),
        );
        assert!(record.is_success());
        assert_eq!(record.status(), Some(200));
        assert_eq!(record.title(), Some("Home"));
        assert_eq!(record.content_type(), Some("text/html"));
        assert_eq!(record.error(), None);
    }

    #[test]
    fn test_failure_accessors() {
        let record = PageRecord::failure("https://example.test/gone", Some(404), "HTTP 404");
        assert!(!record.is_success());
        assert_eq!(record.status(), Some(404));
        assert_eq!(record.title(), None);
        assert_eq!(record.error(), Some("HTTP 404"));
    }

    #[test]
    fn test_success_serializes_flat() {
        let record = PageRecord::success(
            "https://example.test/",
            200,
            Some("text/html; charset=utf-8".to_string()),
            Some("Home".to_string()),
        );
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "url": "https://example.test/",
                "status": 200,
                "contentType": "text/html; charset=utf-8",
                "title": "Home"
            })
        );
    }

    #[test]
    fn test_success_omits_missing_fields() {
        let record = PageRecord::success("https://example.test/file.pdf", 200, None, None);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"url": "https://example.test/file.pdf", "status": 200})
        );
    }

    #[test]
    fn test_redirect_record() {
        let record = PageRecord::redirect(
            "https://example.test/old",
            301,
            Some("https://example.test/new".to_string()),
        );
        assert!(!record.is_success());
        assert!(record.is_redirect());
        assert_eq!(record.status(), Some(301));
        assert_eq!(record.location(), Some("https://example.test/new"));
        assert_eq!(record.error(), None);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"url": "https://example.test/old", "status": 301, "location": "https://example.test/new"})
        );
    }

    #[test]
    fn test_failure_serializes_error_field() {
        let record = PageRecord::failure("https://example.test/slow", None, "Request timeout");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"url": "https://example.test/slow", "error": "Request timeout"})
        );
    }
}
