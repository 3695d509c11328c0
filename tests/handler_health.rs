mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_check_memory_backend() {
    let app = common::test_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["status"], "ok");
    assert_eq!(body["checks"]["storage"]["message"], "memory reachable");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = common::test_app();

    let response = app.server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/api/rentals"].is_object());
    assert!(body["paths"]["/health"].is_object());
}
