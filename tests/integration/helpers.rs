//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use officehub_backend::{
    AttendanceBackend, BackendError, BackendResult, Member, NewMember, Occupant, PresenceSnapshot,
    ScanEvent, VisitFilter, VisitRange, VisitRecord,
};
use officehub_core::config::{AppConfig, CommunityConfig};
use officehub_core::types::{CapabilityMode, CommunityId, Document, MemberId, MessageHandle, SurfaceId};
use officehub_dashboard::{PublishError, SurfacePublisher};

pub const TOKEN: &str = "test-token";
pub const CONTROL: u64 = 100;
pub const READ_ONLY: u64 = 200;

/// Attendance backend kept in memory. Identity "404" is unknown.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    pub occupants: Mutex<Vec<Occupant>>,
    pub sign_outs: Mutex<Vec<MemberId>>,
    pub fetches: AtomicUsize,
}

impl MemoryBackend {
    pub fn sign_in_at(&self, id: &str, name: &str, hour: u32) {
        let check_in = chrono::NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        self.occupants.lock().unwrap().push(Occupant {
            identity: MemberId::from(id),
            display_name: name.to_string(),
            check_in,
        });
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttendanceBackend for MemoryBackend {
    async fn fetch_presence(&self) -> PresenceSnapshot {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        PresenceSnapshot::ok(self.occupants.lock().unwrap().clone())
    }

    async fn sign_in(&self, _member: &MemberId) -> BackendResult<()> {
        Ok(())
    }

    async fn sign_out(&self, member: &MemberId) -> BackendResult<()> {
        if member.as_str() == "404" {
            return Err(BackendError::NotRegistered(member.to_string()));
        }
        self.occupants
            .lock()
            .unwrap()
            .retain(|o| &o.identity != member);
        self.sign_outs.lock().unwrap().push(member.clone());
        Ok(())
    }

    async fn sign_out_all(&self) -> BackendResult<()> {
        self.occupants.lock().unwrap().clear();
        Ok(())
    }

    async fn list_members(&self) -> BackendResult<Vec<Member>> {
        Ok(Vec::new())
    }

    async fn create_member(&self, _member: &NewMember) -> BackendResult<()> {
        Ok(())
    }

    async fn delete_member(&self, _uid: &str) -> BackendResult<()> {
        Ok(())
    }

    async fn list_visits(&self, _filter: &VisitFilter) -> BackendResult<Vec<VisitRecord>> {
        Ok(Vec::new())
    }

    async fn delete_visits(&self, _range: &VisitRange) -> BackendResult<u64> {
        Ok(0)
    }

    async fn scan_history(&self) -> BackendResult<Vec<ScanEvent>> {
        Ok(Vec::new())
    }
}

/// Publisher that records every create and edit.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(SurfaceId, Document)>>,
    pub creates: AtomicUsize,
    pub edits: AtomicUsize,
}

impl RecordingPublisher {
    pub fn last_for(&self, community: u64) -> Option<Document> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(s, _)| s.community == CommunityId(community))
            .map(|(_, d)| d.clone())
    }

    pub fn total(&self) -> usize {
        self.creates.load(Ordering::SeqCst) + self.edits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SurfacePublisher for RecordingPublisher {
    async fn create(
        &self,
        surface: &SurfaceId,
        document: &Document,
    ) -> Result<MessageHandle, PublishError> {
        let n = self.creates.fetch_add(1, Ordering::SeqCst);
        self.published
            .lock()
            .unwrap()
            .push((*surface, document.clone()));
        Ok(MessageHandle::from(format!("m{n}")))
    }

    async fn edit(
        &self,
        surface: &SurfaceId,
        _handle: &MessageHandle,
        document: &Document,
    ) -> Result<(), PublishError> {
        self.edits.fetch_add(1, Ordering::SeqCst);
        self.published
            .lock()
            .unwrap()
            .push((*surface, document.clone()));
        Ok(())
    }
}

/// HTTP response captured for assertions
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    pub backend: Arc<MemoryBackend>,
    pub publisher: Arc<RecordingPublisher>,
    shutdown: watch::Sender<bool>,
    runner: Option<JoinHandle<()>>,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.api_token = Some(TOKEN.to_string());
    config.worker.enabled = false;
    config.dashboard.timer_skip_seconds = 0;
    config.dashboard.communities = vec![
        CommunityConfig {
            community_id: CommunityId(CONTROL),
            mode: CapabilityMode::Control,
        },
        CommunityConfig {
            community_id: CommunityId(READ_ONLY),
            mode: CapabilityMode::ReadOnly,
        },
    ];
    config
}

impl TestApp {
    /// Create a new test application with the refresh loop running
    pub async fn new() -> Self {
        let backend = Arc::new(MemoryBackend::default());
        let publisher = Arc::new(RecordingPublisher::default());

        let services = officehub_api::wire(
            test_config(),
            Arc::clone(&backend) as Arc<dyn AttendanceBackend>,
            Arc::clone(&publisher) as Arc<dyn SurfacePublisher>,
        )
        .expect("Failed to wire services");

        let (shutdown, cancel) = watch::channel(false);
        let runner = services.runner;
        let handle = tokio::spawn(async move { runner.run(cancel).await });

        Self {
            router: officehub_api::build_app(services.state),
            backend,
            publisher,
            shutdown,
            runner: Some(handle),
        }
    }

    /// Make a JSON request with optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Authenticated JSON request
    pub async fn call(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request(method, path, body, Some(TOKEN)).await
    }

    /// Register a dashboard surface and wait for its first publish
    pub async fn setup(&self, community: u64, channel: u64) -> TestResponse {
        let before = self.publisher.total();
        let response = self
            .call(
                "POST",
                "/api/surfaces",
                Some(serde_json::json!({"community_id": community, "channel_id": channel})),
            )
            .await;
        if response.status == StatusCode::CREATED {
            self.wait_for_publishes(before + 1).await;
        }
        response
    }

    /// Poll until at least `count` publishes have happened
    pub async fn wait_for_publishes(&self, count: usize) {
        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while self.publisher.total() < count {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("Timed out waiting for publish");
    }

    /// Stop the refresh loop and wait for it to exit
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.runner.take() {
            handle.await.expect("Refresh loop panicked");
        }
    }
}
