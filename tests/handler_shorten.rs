mod common;

use axum_test::TestServer;
use gurt_links::domain::repositories::LinkRepository;
use serde_json::json;

#[tokio::test]
async fn test_shorten_creates_link() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "gurt://example.com/page" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    let token = json["short_url"].as_str().unwrap();
    assert!(common::is_generated_token(token), "unexpected token {token}");
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_deduplication() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "gurt://example.com/page" }))
        .await;
    assert_eq!(first.status_code(), 201);

    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "gurt://example.com/page" }))
        .await;
    second.assert_status_ok();

    assert_eq!(
        first.json::<serde_json::Value>()["short_url"],
        second.json::<serde_json::Value>()["short_url"]
    );
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_with_slug() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "gurt://a.b", "slug": "my-link" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<serde_json::Value>()["short_url"], "my-link");
}

#[tokio::test]
async fn test_shorten_slug_conflict() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    server
        .post("/api/shorten")
        .json(&json!({ "url": "gurt://a.b", "slug": "my-link" }))
        .await;

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "gurt://c.d", "slug": "my-link" }))
        .await;

    assert_eq!(response.status_code(), 409);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "conflict");
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_slug_for_known_address_creates_second_link() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    server
        .post("/api/shorten")
        .json(&json!({ "url": "gurt://a.b" }))
        .await;

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "gurt://a.b", "slug": "alias" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<serde_json::Value>()["short_url"], "alias");
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_shorten_invalid_slug() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    for slug in ["", "has space", "emoji🙂", "a/b"] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": "gurt://a.b", "slug": slug }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["error"]["code"],
            "validation_error"
        );
    }

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_rejects_non_gurt_address() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "http://not-gurt.com" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Only gurt:// URLs are supported");
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_rejects_nul_in_address() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "gurt://a\u{0}b" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_missing_url() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let missing = server.post("/api/shorten").json(&json!({})).await;
    missing.assert_status_bad_request();

    let empty = server.post("/api/shorten").json(&json!({ "url": "" })).await;
    empty.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_malformed_body() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": 42 }))
        .await;

    response.assert_status_bad_request();
}
