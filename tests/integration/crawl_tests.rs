//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small comic site and run the full
//! archive → chapter → page traversal end-to-end over real HTTP.

use comic_archiver::config::{Config, CrawlerConfig, PageScope, SiteConfig, UserAgentConfig};
use comic_archiver::output::{JsonOutputHandler, OutputHandler};
use comic_archiver::{ArchiveTarget, Chapter, Crawler};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IMAGE_PREFIX: &str = "https://img.example.com/comics/";

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, workers: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_concurrent_units: workers,
            request_timeout_secs: 5,
            connect_timeout_secs: 5,
            page_scope: PageScope::PerChapter,
        },
        site: SiteConfig {
            base_url: base_url.to_string(),
            image_prefix: IMAGE_PREFIX.to_string(),
            ..SiteConfig::default()
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
        },
        ..Config::default()
    }
}

fn archive_html(chapters: &[(&str, &str)]) -> String {
    let entries: String = chapters
        .iter()
        .map(|(href, title)| {
            format!(
                r#"<a href="{}"><div class="archive-chapter">{}</div></a>"#,
                href, title
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", entries)
}

fn chapter_html(pages: &[(&str, &str)]) -> String {
    let entries: String = pages
        .iter()
        .map(|(href, label)| {
            format!(
                r#"<a href="{}"><div class="archive-comic"><span>{}</span></div></a>"#,
                href, label
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", entries)
}

fn page_html(image: &str) -> String {
    format!(
        r#"<html><body><img src="/static/logo.png"><img src="{}"></body></html>"#,
        image
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mounts a two-chapter comic: chapter one has three pages, chapter two one
async fn mount_two_chapter_comic(server: &MockServer) {
    mount_html(
        server,
        "/read/42/archive",
        archive_html(&[("/read/42/c/1", "Chapter 1"), ("/read/42/c/2", "Chapter 2")]),
    )
    .await;
    mount_html(
        server,
        "/read/42/c/1",
        chapter_html(&[
            ("/read/42/p/1", "Cover"),
            ("/read/42/p/2", "Page 2"),
            ("/read/42/p/3", "Page 3"),
        ]),
    )
    .await;
    mount_html(server, "/read/42/c/2", chapter_html(&[("/read/42/p/4", "Finale")])).await;

    for n in 1..=4 {
        mount_html(
            server,
            &format!("/read/42/p/{}", n),
            page_html(&format!("{}page{}.png", IMAGE_PREFIX, n)),
        )
        .await;
    }
}

#[tokio::test]
async fn test_full_crawl_two_chapters() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_two_chapter_comic(&mock_server).await;

    let config = create_test_config(&base_url, 4);
    let target = ArchiveTarget::from_id(&config.site, "42").expect("Failed to build target");
    let crawler = Crawler::from_config(config).expect("Failed to create crawler");

    let report = crawler.crawl(&target).await;

    assert_eq!(report.chapters.len(), 2);

    let first = &report.chapters[0];
    assert_eq!(first.title, "Chapter 1");
    assert_eq!(first.url, format!("{}/read/42/c/1", base_url));
    assert_eq!(first.pages.len(), 3);
    assert_eq!(first.pages[0].page_title, "Cover");
    assert_eq!(first.pages[0].page_url, format!("{}/read/42/p/1", base_url));
    assert_eq!(
        first.pages[2].image_url.as_deref(),
        Some("https://img.example.com/comics/page3.png")
    );

    let second = &report.chapters[1];
    assert_eq!(second.title, "Chapter 2");
    assert_eq!(second.pages.len(), 1);
    assert_eq!(second.pages[0].page_title, "Finale");
    assert_eq!(
        second.pages[0].image_url.as_deref(),
        Some("https://img.example.com/comics/page4.png")
    );

    let stats = &report.statistics;
    assert_eq!(stats.chapters_found, 2);
    assert_eq!(stats.pages_found, 4);
    assert_eq!(stats.images_resolved, 4);
    assert!(!stats.has_degradation());

    // One archive request, two chapter requests, four page requests
    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert_eq!(requests.len(), 7);
}

#[tokio::test]
async fn test_archive_not_found_yields_empty_result() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_status(&mock_server, "/read/42/archive", 404).await;

    let config = create_test_config(&base_url, 4);
    let target = ArchiveTarget::from_url(&format!("{}/read/42/archive", base_url))
        .expect("Failed to build target");
    let crawler = Crawler::from_config(config).expect("Failed to create crawler");

    let report = crawler.crawl(&target).await;

    assert!(report.chapters.is_empty());
    assert!(report.statistics.archive_failure.is_some());
    assert!(report.statistics.has_degradation());
}

#[tokio::test]
async fn test_failing_chapter_is_isolated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/read/42/archive",
        archive_html(&[
            ("/read/42/c/1", "Broken"),
            ("/read/42/c/2", "Healthy"),
        ]),
    )
    .await;
    mount_status(&mock_server, "/read/42/c/1", 500).await;
    mount_html(&mock_server, "/read/42/c/2", chapter_html(&[("/read/42/p/9", "Only")])).await;
    mount_html(
        &mock_server,
        "/read/42/p/9",
        page_html(&format!("{}nine.png", IMAGE_PREFIX)),
    )
    .await;

    let config = create_test_config(&base_url, 2);
    let target = ArchiveTarget::from_id(&config.site, "42").expect("Failed to build target");
    let report = Crawler::from_config(config)
        .expect("Failed to create crawler")
        .crawl(&target)
        .await;

    assert_eq!(report.chapters.len(), 2);
    assert_eq!(report.chapters[0].title, "Broken");
    assert!(report.chapters[0].pages.is_empty());
    assert_eq!(report.chapters[1].title, "Healthy");
    assert_eq!(report.chapters[1].pages.len(), 1);
    assert_eq!(
        report.chapters[1].pages[0].image_url.as_deref(),
        Some("https://img.example.com/comics/nine.png")
    );
    assert_eq!(report.statistics.chapters_failed, 1);
}

#[tokio::test]
async fn test_failing_page_has_no_image() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/read/42/archive",
        archive_html(&[("/read/42/c/1", "Chapter 1")]),
    )
    .await;
    mount_html(
        &mock_server,
        "/read/42/c/1",
        chapter_html(&[
            ("/read/42/p/1", "Gone"),
            ("/read/42/p/2", "Plain"),
            ("/read/42/p/3", "Fine"),
        ]),
    )
    .await;
    mount_status(&mock_server, "/read/42/p/1", 404).await;
    // Only the logo, nothing under the image prefix
    mount_html(&mock_server, "/read/42/p/2", page_html("/static/banner.png")).await;
    mount_html(
        &mock_server,
        "/read/42/p/3",
        page_html(&format!("{}three.png", IMAGE_PREFIX)),
    )
    .await;

    let config = create_test_config(&base_url, 4);
    let target = ArchiveTarget::from_id(&config.site, "42").expect("Failed to build target");
    let report = Crawler::from_config(config)
        .expect("Failed to create crawler")
        .crawl(&target)
        .await;

    let pages = &report.chapters[0].pages;
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].page_title, "Gone");
    assert_eq!(pages[0].image_url, None);
    assert_eq!(pages[1].image_url, None);
    assert_eq!(
        pages[2].image_url.as_deref(),
        Some("https://img.example.com/comics/three.png")
    );

    let stats = &report.statistics;
    assert_eq!(stats.page_fetches_failed, 1);
    assert_eq!(stats.images_missing, 1);
    assert_eq!(stats.images_resolved, 1);
}

#[tokio::test]
async fn test_shared_page_scope_produces_same_result() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_two_chapter_comic(&mock_server).await;

    let per_chapter = create_test_config(&base_url, 2);
    let mut shared = per_chapter.clone();
    shared.crawler.page_scope = PageScope::Shared;

    let target = ArchiveTarget::from_id(&per_chapter.site, "42").expect("Failed to build target");

    let first = Crawler::from_config(per_chapter)
        .expect("Failed to create crawler")
        .crawl(&target)
        .await;
    let second = Crawler::from_config(shared)
        .expect("Failed to create crawler")
        .crawl(&target)
        .await;

    assert_eq!(first.chapters, second.chapters);
}

#[tokio::test]
async fn test_crawl_and_write_json() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_two_chapter_comic(&mock_server).await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("out").join("chapters.json");

    let config = create_test_config(&base_url, 4);
    let target = ArchiveTarget::from_id(&config.site, "42").expect("Failed to build target");
    let report = comic_archiver::crawler::crawl(config, &target)
        .await
        .expect("Crawl failed");

    let handler = JsonOutputHandler::new(&output_path);
    handler.write(&report.chapters).expect("Failed to write JSON");

    let written = std::fs::read_to_string(&output_path).expect("Failed to read output");
    assert!(written.contains("\"img_url\""));
    assert!(written.contains("\n    {"));

    let parsed: Vec<Chapter> = serde_json::from_str(&written).expect("Output is not valid JSON");
    assert_eq!(parsed, report.chapters);
}
