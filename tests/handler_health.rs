mod common;

use axum_test::TestServer;

#[tokio::test]
async fn test_index_banner() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["hello"], "world");
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_app_router_trims_trailing_slash() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::create_routed_app(state)).unwrap();

    let health = server.get("/health/").await;
    health.assert_status_ok();
    assert_eq!(health.json::<serde_json::Value>()["status"], "healthy");

    let created = server
        .post("/api/shorten/")
        .json(&serde_json::json!({ "url": "gurt://example.com", "slug": "trail" }))
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);

    server.get("/api/redirect/trail/").await.assert_status_ok();
}
