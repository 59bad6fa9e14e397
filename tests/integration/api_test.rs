//! Integration tests for the HTTP API surface.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{CONTROL, TestApp};

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["surfaces"], 0);
    app.shutdown().await;
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/api/surfaces", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "UNAUTHORIZED");

    let wrong = app
        .request("GET", "/api/surfaces", None, Some("not-the-token"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let ok = app.call("GET", "/api/surfaces", None).await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["data"], json!([]));
    app.shutdown().await;
}

#[tokio::test]
async fn test_setup_unconfigured_community_is_not_found() {
    let app = TestApp::new().await;

    let response = app.setup(999, 1).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(app.publisher.total(), 0);
    app.shutdown().await;
}

#[tokio::test]
async fn test_setup_registers_and_publishes() {
    let app = TestApp::new().await;

    let response = app.setup(CONTROL, 10).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["mode"], "control");
    assert_eq!(response.body["data"]["surface_id"]["channel"], 10);

    let mut handle = serde_json::Value::Null;
    for _ in 0..200 {
        let list = app.call("GET", "/api/surfaces", None).await;
        handle = list.body["data"][0]["message_handle"].clone();
        if !handle.is_null() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(handle, "m0");

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.body["data"]["surfaces"], 1);
    app.shutdown().await;
}

#[tokio::test]
async fn test_refresh_unknown_target_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .call("POST", "/api/refresh", Some(json!({"target": CONTROL})))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    app.shutdown().await;
}

#[tokio::test]
async fn test_refresh_all_is_accepted() {
    let app = TestApp::new().await;
    app.setup(CONTROL, 10).await;
    let fetches = app.backend.fetches();

    let response = app.call("POST", "/api/refresh", None).await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["data"]["queued"], true);
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while app.backend.fetches() <= fetches {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("refresh never fetched");
    app.shutdown().await;
}

#[tokio::test]
async fn test_malformed_interaction_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .call("POST", "/api/interactions", Some(json!({"type": "wave"})))
        .await;

    assert!(response.status.is_client_error());
    app.shutdown().await;
}
