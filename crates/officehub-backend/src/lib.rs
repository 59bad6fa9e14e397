//! # officehub-backend
//!
//! Typed client for the attendance backend. The dashboard and report engines
//! depend on the [`AttendanceBackend`] trait; [`BackendClient`] is the
//! reqwest implementation used in production.
//!
//! Presence fetches never fail across the crate boundary: a failed fetch
//! yields a [`PresenceSnapshot`] tagged with the error so callers can render
//! an "offline" state. State-changing calls (sign-in, sign-out, deletes) are
//! issued exactly once and never retried.

pub mod backend;
pub mod client;
pub mod error;
pub mod models;

pub use backend::AttendanceBackend;
pub use client::BackendClient;
pub use error::{BackendError, BackendResult};
pub use models::{
    Member, NewMember, Occupant, PresenceSnapshot, ScanEvent, SnapshotStatus, VisitFilter,
    VisitRange, VisitRecord,
};
