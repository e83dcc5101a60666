//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from seed to written output files.

use sitewalk::config::{resolve_config, CliOverrides, CrawlConfig, FileConfig};
use sitewalk::crawler::crawl;
use sitewalk::output::write_outputs;
use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the mock server with no delay
fn create_test_config(server: &MockServer, out_dir: &Path) -> CrawlConfig {
    let cli = CliOverrides {
        start: Some(server.uri()),
        out: Some(out_dir.to_path_buf()),
        delay: Some(0),
        ..Default::default()
    };
    resolve_config(FileConfig::default(), cli).expect("valid test config")
}

fn html(body: &str) -> ResponseTemplate {
    // set_body_string would force text/plain
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

fn redirect(status: u16, location: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).insert_header("location", location)
}

async fn mount_page(server: &MockServer, route: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

fn as_set(urls: &[String]) -> HashSet<String> {
    urls.iter().cloned().collect()
}

#[tokio::test]
async fn test_equivalent_links_collapse_to_one_url() {
    let server = MockServer::start().await;
    let base = server.uri();

    // No robots.txt mock: wiremock answers 404, which allows everything
    mount_page(
        &server,
        "/",
        &format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="/a">A</a>
            <a href="/a/">A with slash</a>
            <a href="{base}/a#section">A with fragment</a>
            <a href="https://other.test/b">Elsewhere</a>
            <a href="mailto:x@y.com">Mail</a>
            </body></html>"#
        ),
        1,
    )
    .await;
    mount_page(&server, "/a", "<html><title>A</title></html>", 1).await;

    let tmp = TempDir::new().unwrap();
    let report = crawl(create_test_config(&server, tmp.path())).await.unwrap();

    assert_eq!(report.start, format!("{}/", base));
    assert_eq!(report.urls, vec![format!("{}/", base), format!("{}/a", base)]);
    assert_eq!(report.count, 2);
    assert_eq!(report.details.len(), 2);

    let home = report
        .details
        .iter()
        .find(|r| r.url == format!("{}/", base))
        .unwrap();
    assert_eq!(home.status(), Some(200));
    assert_eq!(home.title(), Some("Home"));
}

#[tokio::test]
async fn test_max_pages_caps_discovery() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><a href="/a">A</a><a href="/b">B</a></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/a", "<html></html>", 0).await;
    mount_page(&server, "/b", "<html></html>", 0).await;

    let tmp = TempDir::new().unwrap();
    let mut config = create_test_config(&server, tmp.path());
    config.max_pages = 1;

    let report = crawl(config).await.unwrap();

    assert_eq!(report.urls, vec![format!("{}/", server.uri())]);
    assert_eq!(report.details.len(), 1);
}

#[tokio::test]
async fn test_robots_disallowed_urls_never_fetched() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow: /private\n").await;
    mount_page(
        &server,
        "/",
        r#"<html><a href="/private/x">Secret</a><a href="/public">Public</a></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/private/x", "<html></html>", 0).await;
    mount_page(&server, "/public", "<html></html>", 1).await;

    let tmp = TempDir::new().unwrap();
    let report = crawl(create_test_config(&server, tmp.path())).await.unwrap();

    let base = server.uri();
    assert_eq!(
        as_set(&report.urls),
        as_set(&[format!("{}/", base), format!("{}/public", base)])
    );
}

#[tokio::test]
async fn test_robots_group_for_crawler_token() {
    let server = MockServer::start().await;
    mount_robots(
        &server,
        "User-agent: sitewalk\nDisallow: /secret\n\nUser-agent: *\nAllow: /\n",
    )
    .await;
    mount_page(
        &server,
        "/",
        r#"<html><a href="/secret">Secret</a><a href="/open">Open</a></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/secret", "<html></html>", 0).await;
    mount_page(&server, "/open", "<html></html>", 1).await;

    let tmp = TempDir::new().unwrap();
    let report = crawl(create_test_config(&server, tmp.path())).await.unwrap();

    assert_eq!(report.count, 2);
}

#[tokio::test]
async fn test_disallowed_seed_still_writes_empty_output() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow: /\n").await;
    mount_page(&server, "/", "<html></html>", 0).await;

    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("data");
    let config = create_test_config(&server, &out_dir);

    let report = crawl(config).await.unwrap();
    assert!(report.urls.is_empty());
    assert!(report.details.is_empty());

    write_outputs(&report, &out_dir, None).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("urls.json")).unwrap())
            .unwrap();
    assert_eq!(json["count"], 0);
    assert_eq!(
        std::fs::read_to_string(out_dir.join("urls.csv")).unwrap(),
        "url\n"
    );
    assert!(out_dir.join("sitemap.xml").is_file());
}

#[tokio::test]
async fn test_non_html_and_error_pages_are_recorded() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><a href="/doc.pdf">PDF</a><a href="/missing">Gone</a></html>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-1.4 <a href=\"/never\">".to_vec(), "application/pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let report = crawl(create_test_config(&server, tmp.path())).await.unwrap();
    let base = server.uri();

    assert_eq!(report.count, 3);

    let pdf = report
        .details
        .iter()
        .find(|r| r.url == format!("{}/doc.pdf", base))
        .unwrap();
    assert!(pdf.is_success());
    assert_eq!(pdf.status(), Some(200));
    assert_eq!(pdf.content_type(), Some("application/pdf"));
    assert_eq!(pdf.title(), None);

    let missing = report
        .details
        .iter()
        .find(|r| r.url == format!("{}/missing", base))
        .unwrap();
    assert!(!missing.is_success());
    assert_eq!(missing.status(), Some(404));
    assert_eq!(missing.error(), Some("HTTP 404"));

    let json = serde_json::to_value(&report).unwrap();
    let missing_json = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["url"] == format!("{}/missing", base))
        .unwrap();
    assert_eq!(missing_json["error"], "HTTP 404");
}

#[tokio::test]
async fn test_redirect_targets_pass_scope_and_robots() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    let base = server.uri();
    // Scope compares hosts only, so the other server must use another name
    let other_site = format!("http://localhost:{}", other.address().port());

    mount_robots(&server, "User-agent: *\nDisallow: /private\n").await;
    mount_page(
        &server,
        "/",
        r#"<html><a href="/go">Go</a><a href="/off">Off</a><a href="/moved">Moved</a><a href="/docs">Docs</a></html>"#,
        1,
    )
    .await;

    for (route, status, location) in [
        ("/go", 302, "/private/x".to_string()),
        ("/off", 302, format!("{}/page", other_site)),
        ("/moved", 301, "/new".to_string()),
        ("/docs", 301, "/docs/".to_string()),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(redirect(status, &location))
            .expect(1)
            .mount(&server)
            .await;
    }

    mount_page(&server, "/private/x", "<html></html>", 0).await;
    mount_page(&server, "/new", "<html><title>New</title></html>", 1).await;
    mount_page(&server, "/docs/", "<html><title>Docs</title></html>", 1).await;
    Mock::given(method("GET"))
        .respond_with(html("<html></html>"))
        .expect(0)
        .mount(&other)
        .await;

    let tmp = TempDir::new().unwrap();
    let report = crawl(create_test_config(&server, tmp.path())).await.unwrap();

    assert_eq!(
        as_set(&report.urls),
        as_set(&[
            format!("{}/", base),
            format!("{}/go", base),
            format!("{}/off", base),
            format!("{}/moved", base),
            format!("{}/docs", base),
            format!("{}/new", base),
        ])
    );

    let find = |suffix: &str| {
        report
            .details
            .iter()
            .find(|r| r.url == format!("{}{}", base, suffix))
            .unwrap()
    };

    let go = find("/go");
    assert!(go.is_redirect());
    assert_eq!(go.status(), Some(302));
    assert_eq!(go.location(), Some(format!("{}/private/x", base).as_str()));

    let off = find("/off");
    assert_eq!(off.location(), Some(format!("{}/page", other_site).as_str()));

    assert_eq!(find("/moved").status(), Some(301));
    assert_eq!(find("/new").title(), Some("New"));

    // Same-page hops are followed inside one fetch
    let docs = find("/docs");
    assert!(docs.is_success());
    assert_eq!(docs.title(), Some("Docs"));
}

#[tokio::test]
async fn test_densely_linked_pages_fetched_once() {
    let server = MockServer::start().await;

    let links: String = (0..20)
        .map(|i| format!(r#"<a href="/p{}">P{}</a><a href="/p{}/">again</a>"#, i, i, i))
        .collect();
    let body = format!("<html><body><a href=\"/\">Home</a>{}</body></html>", links);

    mount_page(&server, "/", &body, 1).await;
    for i in 0..20 {
        mount_page(&server, &format!("/p{}", i), &body, 1).await;
    }

    let tmp = TempDir::new().unwrap();
    let mut config = create_test_config(&server, tmp.path());
    config.concurrency = 8;

    let report = crawl(config).await.unwrap();

    assert_eq!(report.count, 21);
    assert_eq!(as_set(&report.urls).len(), report.urls.len());
    assert_eq!(report.details.len(), 21);
}

#[tokio::test]
async fn test_politeness_delay_spaces_requests() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><a href="/a">A</a><a href="/b">B</a></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/a", "<html></html>", 1).await;
    mount_page(&server, "/b", "<html></html>", 1).await;

    let tmp = TempDir::new().unwrap();
    let mut config = create_test_config(&server, tmp.path());
    config.concurrency = 1;
    config.delay_ms = 200;

    let started = Instant::now();
    let report = crawl(config).await.unwrap();

    assert_eq!(report.details.len(), 3);
    // Three dispatches on one slot: two delays between them
    assert!(started.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_output_files_agree_on_url_set() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><a href="/a">A</a><a href="/b?x=1&amp;y=2">B</a></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/a", r#"<html><a href="/c">C</a></html>"#, 1).await;
    mount_page(&server, "/b", "<html></html>", 1).await;
    mount_page(&server, "/c", r#"<html><a href="/">Home</a></html>"#, 1).await;

    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("out");
    let report = crawl(create_test_config(&server, &out_dir)).await.unwrap();
    write_outputs(&report, &out_dir, None).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("urls.json")).unwrap())
            .unwrap();
    let json_urls: Vec<String> = json["urls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u.as_str().unwrap().to_string())
        .collect();

    let mut reader = csv::Reader::from_path(out_dir.join("urls.csv")).unwrap();
    let csv_urls: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();

    let sitemap = std::fs::read_to_string(out_dir.join("sitemap.xml")).unwrap();
    let sitemap_urls: Vec<String> = sitemap
        .split("<loc>")
        .skip(1)
        .filter_map(|chunk| chunk.split("</loc>").next())
        .map(|loc| loc.replace("&amp;", "&"))
        .collect();

    assert_eq!(json_urls.len(), 4);
    assert_eq!(as_set(&json_urls).len(), json_urls.len());
    assert!(json_urls.contains(&format!("{}/b?x=1&y=2", server.uri())));
    assert_eq!(json_urls, csv_urls);
    assert_eq!(as_set(&json_urls), as_set(&sitemap_urls));
}
