//! Integration tests for `SessionFetcher` against a local mock server.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orderhist_core::models::config::SessionConfig;
use orderhist_core::{PageFetcher, SessionFetcher};

fn session_config(cookie: Option<&str>) -> SessionConfig {
    SessionConfig {
        cookie: cookie.map(str::to_string),
        user_agent: "orderhist-test/0.1".to_string(),
        timeout_secs: 5,
        ..SessionConfig::default()
    }
}

#[tokio::test]
async fn fetch_page_sends_session_headers_and_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gp/css/summary/print.html"))
        .and(header("cookie", "session-id=abc; x-main=def"))
        .and(header("user-agent", "orderhist-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>invoice</html>"))
        .mount(&server)
        .await;

    let mut fetcher =
        SessionFetcher::new(&session_config(Some("session-id=abc; x-main=def")), 0.0).unwrap();
    let url = format!("{}/gp/css/summary/print.html", server.uri());
    let page = fetcher.fetch_page(&url, true).await;

    assert!(page.success);
    assert_eq!(page.url, url);
    assert_eq!(page.body, "<html>invoice</html>");
    assert!(fetcher.is_running());
}

#[tokio::test]
async fn failed_fetch_returns_empty_page_and_stops_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .mount(&server)
        .await;

    let mut fetcher = SessionFetcher::new(&session_config(None), 0.0).unwrap();
    let page = fetcher.fetch_page(&format!("{}/missing", server.uri()), false).await;

    assert!(!page.success);
    assert!(page.body.is_empty());
    assert!(!fetcher.is_running(), "session should stop after a failure");
}

#[tokio::test]
async fn session_restarts_after_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let mut fetcher = SessionFetcher::new(&session_config(None), 0.0).unwrap();

    let bad = fetcher.fetch_page(&format!("{}/bad", server.uri()), false).await;
    assert!(!bad.success);

    let good = fetcher.fetch_page(&format!("{}/good", server.uri()), false).await;
    assert!(good.success);
    assert_eq!(good.body, "ok");
    assert!(fetcher.is_running());
}

#[tokio::test]
async fn unreachable_host_is_a_failed_page() {
    // Nothing listens on the discard port.
    let mut fetcher = SessionFetcher::new(&session_config(None), 0.0).unwrap();
    let page = fetcher.fetch_page("http://127.0.0.1:9/", false).await;

    assert!(!page.success);
    assert!(page.body.is_empty());
}

#[test]
fn invalid_cookie_fails_on_start() {
    let mut fetcher = SessionFetcher::new(&session_config(Some("bad\ncookie")), 0.0).unwrap();
    assert!(fetcher.start().is_err());
    assert!(!fetcher.is_running());
}
