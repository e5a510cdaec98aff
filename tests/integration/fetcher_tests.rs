//! Integration tests for the HTTP fetcher
//!
//! These tests run the real reqwest-backed fetcher against wiremock servers
//! to check how responses are classified.

use comic_archiver::config::{CrawlerConfig, UserAgentConfig};
use comic_archiver::crawler::{FetchResult, Fetcher, HttpFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: None,
    };
    HttpFetcher::from_config(&user_agent, &CrawlerConfig::default())
        .expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_success_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/read/42/archive"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>archive</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/read/42/archive", mock_server.uri());
    match fetcher().fetch(&url).await {
        FetchResult::Success {
            status_code, body, ..
        } => {
            assert_eq!(status_code, 200);
            assert_eq!(body, "<html>archive</html>");
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    assert_eq!(
        fetcher().fetch(&url).await,
        FetchResult::HttpError { status_code: 404 }
    );
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1) // Exactly one attempt
        .mount(&mock_server)
        .await;

    let url = format!("{}/flaky", mock_server.uri());
    assert_eq!(
        fetcher().fetch(&url).await,
        FetchResult::HttpError { status_code: 503 }
    );
}

#[tokio::test]
async fn test_redirect_followed_by_default() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/new", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
        .mount(&mock_server)
        .await;

    match fetcher().fetch(&format!("{}/old", base_url)).await {
        FetchResult::Success {
            final_url, body, ..
        } => {
            assert_eq!(final_url, format!("{}/new", base_url));
            assert_eq!(body, "moved");
        }
        other => panic!("Expected success, got {:?}", other),
    }
}
