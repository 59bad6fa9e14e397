//! End-to-end dashboard flows through the HTTP API and the refresh loop.

mod helpers;

use std::time::Duration;

use serde_json::{Value, json};

use helpers::{CONTROL, READ_ONLY, TestApp};

fn button(community: u64, custom_id: &str, identity: &str) -> Value {
    json!({
        "type": "button",
        "community": community,
        "custom_id": custom_id,
        "caller": {"identity": identity, "display_name": identity}
    })
}

async fn wait_for_fetches(app: &TestApp, more_than: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while app.backend.fetches() <= more_than {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Timed out waiting for fetch");
}

#[tokio::test]
async fn test_surfaces_render_mode_specific_controls() {
    let app = TestApp::new().await;
    app.backend.sign_in_at("1", "Alice", 9);

    app.setup(CONTROL, 10).await;
    app.setup(READ_ONLY, 20).await;

    let control = app.publisher.last_for(CONTROL).unwrap();
    let read_only = app.publisher.last_for(READ_ONLY).unwrap();

    assert_eq!(control.controls.len(), 2);
    assert_eq!(read_only.controls.len(), 1);
    assert_eq!(control.fields[0].value, "• **Alice** (since 09:00)");
    assert_eq!(control.fields, read_only.fields);
    app.shutdown().await;
}

#[tokio::test]
async fn test_leave_updates_every_surface() {
    let app = TestApp::new().await;
    app.backend.sign_in_at("1", "Alice", 9);
    app.setup(CONTROL, 10).await;
    app.setup(READ_ONLY, 20).await;
    let before = app.publisher.total();

    let reply = app
        .call(
            "POST",
            "/api/interactions",
            Some(button(CONTROL, "ctrl_leave_button", "1")),
        )
        .await;
    assert_eq!(reply.body["success"], true);

    app.wait_for_publishes(before + 2).await;
    for community in [CONTROL, READ_ONLY] {
        let doc = app.publisher.last_for(community).unwrap();
        assert_eq!(doc.fields[0].value, "No one is currently in the office.");
    }
    assert_eq!(app.backend.sign_outs.lock().unwrap().len(), 1);
    app.shutdown().await;
}

#[tokio::test]
async fn test_leave_is_rejected_on_read_only_surface() {
    let app = TestApp::new().await;
    app.backend.sign_in_at("1", "Alice", 9);
    app.setup(READ_ONLY, 20).await;

    let reply = app
        .call(
            "POST",
            "/api/interactions",
            Some(button(READ_ONLY, "ctrl_leave_button", "1")),
        )
        .await;

    assert_eq!(reply.body["success"], false);
    assert!(reply.body["content"].as_str().unwrap().starts_with("⛔"));
    assert!(app.backend.sign_outs.lock().unwrap().is_empty());
    app.shutdown().await;
}

#[tokio::test]
async fn test_read_only_refresh_then_cooldown() {
    let app = TestApp::new().await;
    app.setup(READ_ONLY, 20).await;
    let fetches = app.backend.fetches();

    let first = app
        .call(
            "POST",
            "/api/interactions",
            Some(button(READ_ONLY, "ro_refresh_button", "7")),
        )
        .await;
    assert_eq!(first.body["success"], true);
    wait_for_fetches(&app, fetches).await;

    let second = app
        .call(
            "POST",
            "/api/interactions",
            Some(button(READ_ONLY, "ro_refresh_button", "7")),
        )
        .await;
    assert_eq!(second.body["success"], false);
    assert!(second.body["content"].as_str().unwrap().contains("Please wait"));

    // Unchanged presence is not republished.
    assert_eq!(app.publisher.total(), 1);
    app.shutdown().await;
}

#[tokio::test]
async fn test_unregistered_leave_reports_not_registered() {
    let app = TestApp::new().await;
    app.setup(CONTROL, 10).await;

    let reply = app
        .call(
            "POST",
            "/api/interactions",
            Some(button(CONTROL, "ctrl_leave_button", "404")),
        )
        .await;

    assert_eq!(reply.body["success"], false);
    app.shutdown().await;
}
