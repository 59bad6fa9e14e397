//! The seam between the engines and the attendance backend.

use async_trait::async_trait;

use officehub_core::types::MemberId;

use crate::error::BackendResult;
use crate::models::{
    Member, NewMember, PresenceSnapshot, ScanEvent, VisitFilter, VisitRange, VisitRecord,
};

/// Operations the dashboard and report engines need from the attendance backend.
#[async_trait]
pub trait AttendanceBackend: Send + Sync + std::fmt::Debug {
    /// Fetch the current occupants. Failures are carried in the snapshot.
    async fn fetch_presence(&self) -> PresenceSnapshot;

    /// Sign a member in. Single-shot.
    async fn sign_in(&self, member: &MemberId) -> BackendResult<()>;

    /// Sign a member out. Single-shot.
    async fn sign_out(&self, member: &MemberId) -> BackendResult<()>;

    /// Sign everyone out. Single-shot.
    async fn sign_out_all(&self) -> BackendResult<()>;

    /// List registered members.
    async fn list_members(&self) -> BackendResult<Vec<Member>>;

    /// Register a member.
    async fn create_member(&self, member: &NewMember) -> BackendResult<()>;

    /// Remove a member by backend UID.
    async fn delete_member(&self, uid: &str) -> BackendResult<()>;

    /// List visits whose check-in falls inside `filter`.
    async fn list_visits(&self, filter: &VisitFilter) -> BackendResult<Vec<VisitRecord>>;

    /// Delete visits inside `range`, returning how many were removed.
    async fn delete_visits(&self, range: &VisitRange) -> BackendResult<u64>;

    /// Most recent raw scan events.
    async fn scan_history(&self) -> BackendResult<Vec<ScanEvent>>;
}
