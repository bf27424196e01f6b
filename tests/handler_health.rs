mod common;

use axum_test::TestServer;
use common::FakeAnalytics;

#[tokio::test]
async fn test_health_unauthenticated() {
    let ctx = common::create_test_state(FakeAnalytics::returning(common::sample_report()));
    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["session"]["status"], "unauthenticated");
    assert!(json["checks"]["session"]["message"].is_string());
}

#[tokio::test]
async fn test_health_authenticated() {
    let ctx = common::create_test_state(FakeAnalytics::returning(common::sample_report()));
    common::authenticate(&ctx.session).await;
    let server = TestServer::new(common::test_router(ctx.state)).unwrap();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["session"]["status"], "authenticated");
    assert!(json["checks"]["session"].get("message").is_none());
    assert!(json.get("version").is_some());
}
