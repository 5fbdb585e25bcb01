//! Integration tests for proxy endpoint discovery and media download,
//! backed by a local wiremock server.

use reqwest::Client;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tubefetch::{ApiEndpoint, MediaFetcher, MediaKind, PlatformError, YouTube};

fn fetcher_for(server: &MockServer, dir: &TempDir) -> MediaFetcher {
    MediaFetcher::new(
        Client::new(),
        ApiEndpoint::from_base(server.uri()),
        dir.path(),
    )
}

async fn mount_token(server: &MockServer, id: &str, kind: &str, token: &str) {
    Mock::given(method("GET"))
        .and(path("/download"))
        .and(query_param("url", id))
        .and(query_param("type", kind))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "download_token": token
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_audio_download_streams_to_cache_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_token(&server, "abc123XY", "audio", "tok-1").await;
    Mock::given(method("GET"))
        .and(path("/stream/abc123XY"))
        .and(query_param("type", "audio"))
        .and(header("X-Download-Token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake mp3 payload".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, &dir);
    let dest = fetcher
        .fetch("https://youtube.com/watch?v=abc123XY&list=z", MediaKind::Audio)
        .await
        .unwrap();

    assert_eq!(dest, dir.path().join("abc123XY.mp3"));
    assert_eq!(std::fs::read(&dest).unwrap(), b"fake mp3 payload");
}

#[tokio::test]
async fn test_video_download_uses_mp4_and_video_type() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_token(&server, "def456ZW", "video", "tok-2").await;
    Mock::given(method("GET"))
        .and(path("/stream/def456ZW"))
        .and(query_param("type", "video"))
        .and(header("X-Download-Token", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake mp4 payload".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, &dir);
    let dest = fetcher.fetch("def456ZW", MediaKind::Video).await.unwrap();

    assert_eq!(dest, dir.path().join("def456ZW.mp4"));
}

#[tokio::test]
async fn test_second_fetch_is_a_cache_hit() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // expect(1) on both mocks: a second network round trip fails the test
    mount_token(&server, "abc123XY", "audio", "tok-3").await;
    Mock::given(method("GET"))
        .and(path("/stream/abc123XY"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, &dir);
    let first = fetcher.fetch("abc123XY", MediaKind::Audio).await.unwrap();
    let second = fetcher.fetch("abc123XY", MediaKind::Audio).await.unwrap();

    assert_eq!(first, second);
    server.verify().await;
}

#[tokio::test]
async fn test_short_id_fails_without_network() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, &dir);
    let res = fetcher.fetch("ab", MediaKind::Audio).await;

    assert!(matches!(res, Err(PlatformError::InvalidIdentifier(_))));
    server.verify().await;
}

#[tokio::test]
async fn test_token_request_non_200_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, &dir);
    let res = fetcher.fetch("abc123XY", MediaKind::Audio).await;

    assert!(matches!(res, Err(PlatformError::Status(s)) if s.as_u16() == 500));
    assert!(!dir.path().join("abc123XY.mp3").exists());
}

#[tokio::test]
async fn test_missing_token_field_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok"
        })))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, &dir);
    let res = fetcher.fetch("abc123XY", MediaKind::Audio).await;

    assert!(matches!(res, Err(PlatformError::MissingToken)));
}

#[tokio::test]
async fn test_stream_non_200_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_token(&server, "abc123XY", "audio", "tok-4").await;
    Mock::given(method("GET"))
        .and(path("/stream/abc123XY"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, &dir);
    let res = fetcher.fetch("abc123XY", MediaKind::Audio).await;

    assert!(matches!(res, Err(PlatformError::Status(s)) if s.as_u16() == 403));
}

#[tokio::test]
async fn test_endpoint_discovery_success_trims_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw/paste"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  https://proxy.example.com\n"))
        .mount(&server)
        .await;

    let endpoint =
        ApiEndpoint::discover(&Client::new(), &format!("{}/raw/paste", server.uri())).await;
    assert_eq!(endpoint.base(), "https://proxy.example.com");
}

#[tokio::test]
async fn test_endpoint_discovery_500_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw/paste"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let endpoint =
        ApiEndpoint::discover(&Client::new(), &format!("{}/raw/paste", server.uri())).await;
    assert_eq!(endpoint.base(), "https://shrutibots.site");
}

#[tokio::test]
async fn test_endpoint_discovery_unreachable_falls_back() {
    // Nothing listens here; connection is refused immediately.
    let endpoint = ApiEndpoint::discover(&Client::new(), "http://127.0.0.1:9/raw/paste").await;
    assert_eq!(endpoint.base(), "https://shrutibots.site");
}

#[tokio::test]
async fn test_facade_download_masks_failures_to_none() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let yt = YouTube::with_parts(
        Client::new(),
        ApiEndpoint::from_base(server.uri()),
        server.uri(),
        dir.path(),
    );

    assert_eq!(yt.download("abc123XY", false, true).await, None);
}

#[tokio::test]
async fn test_facade_download_returns_cached_path() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // Seed the cache; the facade must short-circuit without any mocks mounted.
    std::fs::write(dir.path().join("abc123XY.mp3"), b"cached").unwrap();

    let yt = YouTube::with_parts(
        Client::new(),
        ApiEndpoint::from_base(server.uri()),
        server.uri(),
        dir.path(),
    );

    let path = yt
        .download("https://youtube.com/watch?v=abc123XY&list=z", false, false)
        .await;
    assert_eq!(path, Some(dir.path().join("abc123XY.mp3")));
}
