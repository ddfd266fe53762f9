//! Integration tests for the media resolver against a mock storage API
//!
//! The wiremock `expect` counts are the teeth here: they verify the
//! deduplication and caching properties at the HTTP boundary, not just at
//! the resolver's public surface.

mod common;

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::TEST_BUCKET;
use signal_engine::{MediaResolver, SupabaseStorageClient};

fn sign_response(object_path: &str) -> serde_json::Value {
    json!({
        "signedURL": format!("/object/sign/{}/{}?token=test-token", TEST_BUCKET, object_path)
    })
}

async fn resolver_for(server: &MockServer) -> MediaResolver {
    let storage = Arc::new(
        SupabaseStorageClient::with_timeout(
            &server.uri(),
            TEST_BUCKET,
            Some("test-key".to_string()),
            Duration::from_secs(5),
        )
        .expect("failed to build storage client"),
    );
    MediaResolver::new(storage.clone(), storage, TEST_BUCKET)
}

#[tokio::test]
async fn test_round_trip_issues_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/storage/v1/object/sign/{}/charts/setup.png",
            TEST_BUCKET
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(sign_response("charts/setup.png")))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server).await;

    let first = resolver.resolve("charts/setup.png").await;
    let second = resolver.resolve("charts/setup.png").await;

    let expected = format!(
        "{}/storage/v1/object/sign/{}/charts/setup.png?token=test-token",
        server.uri(),
        TEST_BUCKET
    );
    assert_eq!(first, Some(expected.clone()));
    assert_eq!(second, Some(expected));
}

#[tokio::test]
async fn test_concurrent_resolves_issue_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/storage/v1/object/sign/{}/charts/burst.png",
            TEST_BUCKET
        )))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sign_response("charts/burst.png"))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server).await;

    let results = join_all((0..8).map(|_| resolver.resolve("charts/burst.png"))).await;

    assert!(results.iter().all(|r| r.is_some()));
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_public_url_input_resolves_to_signed_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/storage/v1/object/sign/{}/charts/public.png",
            TEST_BUCKET
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(sign_response("charts/public.png")))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server).await;

    let raw = format!(
        "{}/storage/v1/object/public/{}/charts/public.png",
        server.uri(),
        TEST_BUCKET
    );
    let resolved = resolver.resolve(&raw).await.expect("expected a signed URL");
    assert!(resolved.contains("/object/sign/"));
    assert!(resolved.contains("token=test-token"));
}

#[tokio::test]
async fn test_issuance_failure_falls_back_to_raw_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/storage/v1/object/sign/{}/charts/broken.png",
            TEST_BUCKET
        )))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server).await;

    // The raw reference is itself a well-formed URL, so it passes through
    let raw = format!(
        "{}/storage/v1/object/public/{}/charts/broken.png",
        server.uri(),
        TEST_BUCKET
    );
    assert_eq!(resolver.resolve(&raw).await, Some(raw.clone()));
}

#[tokio::test]
async fn test_issuance_failure_with_plain_path_resolves_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/storage/v1/object/sign/{}/charts/gone.png",
            TEST_BUCKET
        )))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server).await;
    assert_eq!(resolver.resolve("charts/gone.png").await, None);
}

#[tokio::test]
async fn test_foreign_url_passes_through_without_any_call() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and fail `expect` checks
    let resolver = resolver_for(&server).await;

    let raw = "https://cdn.example.com/chart.png";
    assert_eq!(resolver.resolve(raw).await, Some(raw.to_string()));
}

#[tokio::test]
async fn test_preload_fetches_resolved_url_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/storage/v1/object/sign/{}/charts/warm.png",
            TEST_BUCKET
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(sign_response("charts/warm.png")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/storage/v1/object/sign/{}/charts/warm.png",
            TEST_BUCKET
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 64]))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server).await;

    resolver.preload("charts/warm.png").await;
    // Second preload is a no-op: same resolved URL, already attempted
    resolver.preload("charts/warm.png").await;
}
