//! Backend client against a fake attendance backend served by axum.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use officehub_backend::{AttendanceBackend, BackendClient, BackendError, SnapshotStatus, VisitFilter};
use officehub_core::config::BackendConfig;
use officehub_core::types::MemberId;

#[derive(Clone, Default)]
struct Calls {
    sign_out: Arc<AtomicUsize>,
}

async fn current(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer secret") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "missing key"})));
    }
    (
        StatusCode::OK,
        Json(json!([
            {"name": "Alice", "signin_time": "2025-03-10T09:00:00", "discord_id": "1"},
            {"name": "Bob", "signin_time": "2025-03-10T08:00:00"}
        ])),
    )
}

async fn sign_out(State(calls): State<Calls>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    calls.sign_out.fetch_add(1, Ordering::SeqCst);
    match body.get("discord_id").and_then(|v| v.as_str()) {
        Some("1") => (StatusCode::OK, Json(json!({"message": "signed out"}))),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "unknown member"}))),
    }
}

async fn sign_out_all() -> (StatusCode, Json<Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "database locked"})))
}

async fn history(Query(q): Query<std::collections::HashMap<String, String>>) -> Json<Value> {
    assert!(q.contains_key("since"));
    Json(json!([
        {"name": "Alice", "discord_id": "1", "signin_time": "2025-03-10T09:00:00", "signout_time": "2025-03-10T11:00:00"},
        {"name": "Old", "signin_time": "2024-01-01T09:00:00", "signout_time": "2024-01-01T10:00:00"}
    ]))
}

async fn serve(calls: Calls) -> String {
    let app = Router::new()
        .route("/current", get(current))
        .route("/sign-out-discord", post(sign_out))
        .route("/sign-out-all", post(sign_out_all))
        .route("/history", get(history))
        .route("/members", get(|| async { Json(Value::Null) }))
        .with_state(calls);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String) -> BackendClient {
    BackendClient::new(&BackendConfig {
        base_url,
        api_key: Some("secret".to_string()),
        timeout_seconds: 2,
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_presence_decodes_occupants() {
    let client = client(serve(Calls::default()).await);
    let snapshot = client.fetch_presence().await;

    assert_eq!(snapshot.status, SnapshotStatus::Ok);
    assert_eq!(snapshot.occupants.len(), 2);
    assert_eq!(snapshot.occupants[0].identity, MemberId::from("1"));
    assert_eq!(snapshot.occupants[1].identity, MemberId::from("Bob"));
}

#[tokio::test]
async fn test_sign_out_unknown_member_is_not_registered_and_not_retried() {
    let calls = Calls::default();
    let client = client(serve(calls.clone()).await);

    let err = client.sign_out(&MemberId::from("999")).await.unwrap_err();
    assert_eq!(err, BackendError::NotRegistered("999".to_string()));
    assert_eq!(calls.sign_out.load(Ordering::SeqCst), 1);

    client.sign_out(&MemberId::from("1")).await.unwrap();
    assert_eq!(calls.sign_out.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_backend_error_carries_status_and_message() {
    let client = client(serve(Calls::default()).await);
    let err = client.sign_out_all().await.unwrap_err();
    assert_eq!(
        err,
        BackendError::Backend {
            status: 500,
            message: "database locked".to_string()
        }
    );
}

#[tokio::test]
async fn test_null_body_is_invalid_response() {
    let client = client(serve(Calls::default()).await);
    let err = client.list_members().await.unwrap_err();
    assert!(matches!(err, BackendError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_list_visits_reapplies_window() {
    let client = client(serve(Calls::default()).await);
    let since = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let visits = client.list_visits(&VisitFilter::since(since)).await.unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].display_name, "Alice");
}

#[tokio::test]
async fn test_unreachable_backend_yields_failed_snapshot() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{addr}"));
    let snapshot = client.fetch_presence().await;
    match snapshot.status {
        SnapshotStatus::Failed(e) => assert!(e.is_connectivity(), "got {e:?}"),
        SnapshotStatus::Ok => panic!("expected failure"),
    }
    assert!(snapshot.occupants.is_empty());
}
