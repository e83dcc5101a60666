//! HTML parser for extracting links and metadata
//!
//! This module handles parsing HTML content to extract:
//! - The page title
//! - Every `href` of every anchor tag, unresolved
//!
//! Resolution, scheme filtering, scoping and dedup all happen downstream, in
//! the order the crawl session applies them.

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page title (from the first <title> tag)
    pub title: Option<String>,

    /// Raw `href` values of all anchors, in document order
    pub links: Vec<String>,
}

/// Parses HTML content and extracts links and metadata
///
/// html5ever recovers from malformed markup, so parsing never fails; a
/// document it cannot make sense of simply yields no title and no links.
///
/// # Example
///
/// ```
/// use sitewalk::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["/page".to_string()]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the href of every anchor in the document
fn extract_links(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}
