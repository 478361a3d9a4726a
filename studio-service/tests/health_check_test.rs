mod common;

use common::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "studio-service-test");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/ready")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn metrics_endpoint_reports_http_requests() {
    let app = TestApp::spawn().await;

    app.get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get("/metrics")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("http_requests_total"));
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers()["x-content-type-options"],
        "nosniff"
    );
}

#[tokio::test]
async fn openapi_document_lists_invoice_routes() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/.well-known/openapi.json")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let doc: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(doc["paths"]["/api/invoices"]["post"].is_object());
    assert!(doc["paths"]["/api/invoices/{number}"]["get"].is_object());
    assert!(doc["components"]["securitySchemes"]["admin_api_key"].is_object());
}
