//! Shared fakes for dashboard integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::Notify;

use officehub_backend::{
    AttendanceBackend, BackendError, BackendResult, Member, NewMember, Occupant, PresenceSnapshot,
    ScanEvent, VisitFilter, VisitRange, VisitRecord,
};
use officehub_core::config::{CommunityConfig, DashboardConfig, ReportConfig};
use officehub_core::types::{
    CapabilityMode, CommunityId, Document, MemberId, MessageHandle, SurfaceId,
};
use officehub_dashboard::{
    InteractionRouter, PresenceRenderer, PublishError, SurfacePublisher, SurfaceRegistry,
    SyncEngine, SyncHandle,
};
use officehub_report::ReportEngine;

pub const CONTROL: CommunityId = CommunityId(1);
pub const READ_ONLY: CommunityId = CommunityId(2);
pub const UNCONFIGURED: CommunityId = CommunityId(99);

pub fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

pub fn occupant(id: &str, name: &str, check_in: NaiveDateTime) -> Occupant {
    Occupant {
        identity: MemberId::from(id),
        display_name: name.to_string(),
        check_in,
    }
}

/// Blocks the first presence fetch until released.
#[derive(Debug, Default)]
pub struct FetchGate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub occupants: Mutex<Vec<Occupant>>,
    pub presence_error: Mutex<Option<BackendError>>,
    pub unregistered: Mutex<HashSet<MemberId>>,
    pub sign_ins: Mutex<Vec<MemberId>>,
    pub sign_outs: Mutex<Vec<MemberId>>,
    pub sign_out_alls: AtomicUsize,
    pub members: Mutex<Vec<Member>>,
    pub visits: Mutex<Vec<VisitRecord>>,
    pub deleted: Mutex<Vec<VisitRange>>,
    pub fetches: AtomicUsize,
    pub gate: Option<Arc<FetchGate>>,
}

impl FakeBackend {
    pub fn with_occupants(occupants: Vec<Occupant>) -> Self {
        Self {
            occupants: Mutex::new(occupants),
            ..Self::default()
        }
    }

    pub fn set_occupants(&self, occupants: Vec<Occupant>) {
        *self.occupants.lock().unwrap() = occupants;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn sign_outs(&self) -> Vec<MemberId> {
        self.sign_outs.lock().unwrap().clone()
    }

    fn toggle(&self, member: &MemberId, log: &Mutex<Vec<MemberId>>) -> BackendResult<()> {
        if self.unregistered.lock().unwrap().contains(member) {
            return Err(BackendError::NotRegistered(member.to_string()));
        }
        log.lock().unwrap().push(member.clone());
        Ok(())
    }
}

#[async_trait]
impl AttendanceBackend for FakeBackend {
    async fn fetch_presence(&self) -> PresenceSnapshot {
        let previous = self.fetches.fetch_add(1, Ordering::SeqCst);
        if let (Some(gate), 0) = (&self.gate, previous) {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        let error = self.presence_error.lock().unwrap().clone();
        match error {
            Some(e) => PresenceSnapshot::failed(e),
            None => PresenceSnapshot::ok(self.occupants.lock().unwrap().clone()),
        }
    }

    async fn sign_in(&self, member: &MemberId) -> BackendResult<()> {
        self.toggle(member, &self.sign_ins)
    }

    async fn sign_out(&self, member: &MemberId) -> BackendResult<()> {
        self.toggle(member, &self.sign_outs)
    }

    async fn sign_out_all(&self) -> BackendResult<()> {
        self.sign_out_alls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_members(&self) -> BackendResult<Vec<Member>> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn create_member(&self, member: &NewMember) -> BackendResult<()> {
        self.members.lock().unwrap().push(Member {
            name: member.name.clone(),
            uid: member.uid.clone(),
            discord_id: Some(member.discord_id.to_string()),
        });
        Ok(())
    }

    async fn delete_member(&self, uid: &str) -> BackendResult<()> {
        self.members.lock().unwrap().retain(|m| m.uid != uid);
        Ok(())
    }

    async fn list_visits(&self, filter: &VisitFilter) -> BackendResult<Vec<VisitRecord>> {
        Ok(self
            .visits
            .lock()
            .unwrap()
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect())
    }

    async fn delete_visits(&self, range: &VisitRange) -> BackendResult<u64> {
        self.deleted.lock().unwrap().push(*range);
        Ok(3)
    }

    async fn scan_history(&self) -> BackendResult<Vec<ScanEvent>> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Default)]
pub struct FakePublisher {
    pub creates: Mutex<Vec<(SurfaceId, Document)>>,
    pub edits: Mutex<Vec<(SurfaceId, MessageHandle, Document)>>,
    pub failing: Mutex<HashSet<CommunityId>>,
    pub gone: Mutex<HashSet<CommunityId>>,
    next_id: AtomicUsize,
}

impl FakePublisher {
    pub fn creates(&self) -> usize {
        self.creates.lock().unwrap().len()
    }

    pub fn edits(&self) -> usize {
        self.edits.lock().unwrap().len()
    }

    pub fn publishes_to(&self, community: CommunityId) -> usize {
        let creates = self
            .creates
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| s.community == community)
            .count();
        let edits = self
            .edits
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _, _)| s.community == community)
            .count();
        creates + edits
    }

    pub fn last_document(&self, community: CommunityId) -> Option<Document> {
        let edited = self
            .edits
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(s, _, _)| s.community == community)
            .map(|(_, _, d)| d.clone());
        edited.or_else(|| {
            self.creates
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(s, _)| s.community == community)
                .map(|(_, d)| d.clone())
        })
    }

    fn check_failing(&self, surface: &SurfaceId) -> Result<(), PublishError> {
        if self.failing.lock().unwrap().contains(&surface.community) {
            return Err(PublishError::Rejected {
                status: 500,
                message: "boom".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SurfacePublisher for FakePublisher {
    async fn create(
        &self,
        surface: &SurfaceId,
        document: &Document,
    ) -> Result<MessageHandle, PublishError> {
        self.check_failing(surface)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.creates
            .lock()
            .unwrap()
            .push((*surface, document.clone()));
        Ok(MessageHandle::from(format!("msg-{id}")))
    }

    async fn edit(
        &self,
        surface: &SurfaceId,
        handle: &MessageHandle,
        document: &Document,
    ) -> Result<(), PublishError> {
        if self.gone.lock().unwrap().remove(&surface.community) {
            return Err(PublishError::MessageGone);
        }
        self.check_failing(surface)?;
        self.edits
            .lock()
            .unwrap()
            .push((*surface, handle.clone(), document.clone()));
        Ok(())
    }
}

pub fn dashboard_config() -> DashboardConfig {
    DashboardConfig {
        communities: vec![
            CommunityConfig {
                community_id: CONTROL,
                mode: CapabilityMode::Control,
            },
            CommunityConfig {
                community_id: READ_ONLY,
                mode: CapabilityMode::ReadOnly,
            },
        ],
        ..DashboardConfig::default()
    }
}

pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub publisher: Arc<FakePublisher>,
    pub registry: Arc<SurfaceRegistry>,
    pub engine: Arc<SyncEngine>,
}

impl Harness {
    pub fn new(backend: FakeBackend) -> Self {
        let backend = Arc::new(backend);
        let publisher = Arc::new(FakePublisher::default());
        let registry = Arc::new(SurfaceRegistry::new());
        let engine = Arc::new(SyncEngine::new(
            backend.clone(),
            publisher.clone(),
            registry.clone(),
            PresenceRenderer::new("🏢 Office Presence"),
        ));
        Self {
            backend,
            publisher,
            registry,
            engine,
        }
    }

    /// Register both test communities.
    pub fn register_both(&self) {
        self.registry
            .register(SurfaceId::new(CONTROL, 10u64), CapabilityMode::Control);
        self.registry
            .register(SurfaceId::new(READ_ONLY, 20u64), CapabilityMode::ReadOnly);
    }

    pub fn router(&self, sync: SyncHandle) -> InteractionRouter {
        let reports = ReportEngine::new(self.backend.clone(), ReportConfig::default()).unwrap();
        InteractionRouter::new(
            self.backend.clone(),
            self.registry.clone(),
            reports,
            sync,
            dashboard_config(),
        )
    }
}
