//! Wire and domain models for the attendance backend.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use officehub_core::types::timestamp;
use officehub_core::types::MemberId;

use crate::error::BackendError;

/// Layout used when sending timestamps to the backend.
pub(crate) const WIRE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One person currently signed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Occupant {
    /// Backend identity (chat user id when linked, otherwise the name).
    pub identity: MemberId,
    /// Name shown on the dashboard.
    pub display_name: String,
    /// Backend wall-clock sign-in time.
    pub check_in: NaiveDateTime,
}

/// `GET /current` entry.
#[derive(Debug, Deserialize)]
pub(crate) struct OccupantWire {
    name: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    signin_time: NaiveDateTime,
    #[serde(default)]
    discord_id: Option<String>,
}

impl From<OccupantWire> for Occupant {
    fn from(wire: OccupantWire) -> Self {
        let identity = wire
            .discord_id
            .filter(|id| !id.is_empty())
            .map(MemberId::from)
            .unwrap_or_else(|| MemberId::from(wire.name.as_str()));
        Self {
            identity,
            display_name: wire.name,
            check_in: wire.signin_time,
        }
    }
}

/// Outcome tag of a presence fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// The occupant list is authoritative.
    Ok,
    /// The fetch failed; the occupant list is empty and must not be shown as
    /// "nobody is here".
    Failed(BackendError),
}

/// Immutable result of one presence fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceSnapshot {
    /// Occupants in backend order.
    pub occupants: Vec<Occupant>,
    /// When the fetch completed.
    pub fetched_at: DateTime<Utc>,
    /// Success or the error that prevented the fetch.
    pub status: SnapshotStatus,
}

impl PresenceSnapshot {
    /// A successful snapshot.
    pub fn ok(occupants: Vec<Occupant>) -> Self {
        Self {
            occupants,
            fetched_at: Utc::now(),
            status: SnapshotStatus::Ok,
        }
    }

    /// A failed snapshot.
    pub fn failed(error: BackendError) -> Self {
        Self {
            occupants: Vec::new(),
            fetched_at: Utc::now(),
            status: SnapshotStatus::Failed(error),
        }
    }

    /// Whether the fetch succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self.status, SnapshotStatus::Ok)
    }
}

/// A registered member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Display name.
    pub name: String,
    /// Backend UID (student id / badge id).
    pub uid: String,
    /// Linked chat user id.
    #[serde(default)]
    pub discord_id: Option<String>,
}

/// Payload for registering a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    /// Display name.
    pub name: String,
    /// Backend UID.
    pub uid: String,
    /// Chat user id to link.
    pub discord_id: MemberId,
}

/// A completed or open office visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitRecord {
    /// Backend identity (chat user id when linked, otherwise the name).
    pub identity: MemberId,
    /// Display name.
    pub display_name: String,
    /// Sign-in wall-clock time.
    pub check_in: NaiveDateTime,
    /// Sign-out wall-clock time, `None` while the visit is open.
    pub check_out: Option<NaiveDateTime>,
}

impl VisitRecord {
    /// Length of the visit, `None` while it is open.
    pub fn duration(&self) -> Option<Duration> {
        self.check_out.map(|out| out - self.check_in)
    }
}

/// `GET /history` entry.
#[derive(Debug, Deserialize)]
pub(crate) struct VisitWire {
    name: String,
    #[serde(default)]
    discord_id: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    signin_time: NaiveDateTime,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    signout_time: Option<NaiveDateTime>,
}

impl From<VisitWire> for VisitRecord {
    fn from(wire: VisitWire) -> Self {
        let identity = wire
            .discord_id
            .filter(|id| !id.is_empty())
            .map(MemberId::from)
            .unwrap_or_else(|| MemberId::from(wire.name.as_str()));
        Self {
            identity,
            display_name: wire.name,
            check_in: wire.signin_time,
            check_out: wire.signout_time,
        }
    }
}

/// Check-in window for visit listings. Open bounds are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitFilter {
    /// Inclusive lower bound on check-in.
    pub since: Option<NaiveDateTime>,
    /// Exclusive upper bound on check-in.
    pub until: Option<NaiveDateTime>,
}

impl VisitFilter {
    /// No bounds.
    pub fn all() -> Self {
        Self::default()
    }

    /// Visits checked in at or after `since`.
    pub fn since(since: NaiveDateTime) -> Self {
        Self {
            since: Some(since),
            until: None,
        }
    }

    /// Whether a visit falls inside the window.
    pub fn matches(&self, visit: &VisitRecord) -> bool {
        self.since.is_none_or(|s| visit.check_in >= s)
            && self.until.is_none_or(|u| visit.check_in < u)
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(since) = self.since {
            query.push(("since", since.format(WIRE_TIME_FORMAT).to_string()));
        }
        if let Some(until) = self.until {
            query.push(("until", until.format(WIRE_TIME_FORMAT).to_string()));
        }
        query
    }
}

/// Closed check-in range for visit deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRange {
    /// Inclusive start.
    pub since: NaiveDateTime,
    /// Exclusive end.
    pub until: NaiveDateTime,
}

impl VisitRange {
    /// Build a range, rejecting empty or inverted ones.
    pub fn new(since: NaiveDateTime, until: NaiveDateTime) -> Result<Self, BackendError> {
        if since >= until {
            return Err(BackendError::InvalidRequest(format!(
                "visit range start {since} must be before end {until}"
            )));
        }
        Ok(Self { since, until })
    }
}

/// `DELETE /history` response.
#[derive(Debug, Deserialize)]
pub(crate) struct DeleteVisitsWire {
    #[serde(default)]
    pub deleted: u64,
}

/// A raw badge scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    /// Scanned UID.
    #[serde(default = "unknown_uid")]
    pub uid: String,
    /// Member name, when the UID is linked.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw time string as the backend reported it.
    #[serde(default, alias = "timestamp")]
    pub time: Option<String>,
}

impl ScanEvent {
    /// Scan time parsed to wall clock, when the backend sent a parseable value.
    pub fn parsed_time(&self) -> Option<NaiveDateTime> {
        self.time.as_deref().and_then(timestamp::parse_wall_clock)
    }
}

fn unknown_uid() -> String {
    "Unknown UID".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_occupant_identity_prefers_discord_id() {
        let wire: OccupantWire = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "signin_time": "2025-03-10T09:15:00",
            "discord_id": "1001"
        }))
        .unwrap();
        let occupant = Occupant::from(wire);
        assert_eq!(occupant.identity, MemberId::from("1001"));
        assert_eq!(occupant.display_name, "Alice");
    }

    #[test]
    fn test_occupant_identity_falls_back_to_name() {
        let wire: OccupantWire = serde_json::from_value(serde_json::json!({
            "name": "Bob",
            "signin_time": "2025-03-10T09:15:00"
        }))
        .unwrap();
        assert_eq!(Occupant::from(wire).identity, MemberId::from("Bob"));
    }

    #[test]
    fn test_visit_open_has_no_duration() {
        let wire: VisitWire = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "signin_time": "2025-03-10T09:00:00",
            "signout_time": null
        }))
        .unwrap();
        assert_eq!(VisitRecord::from(wire).duration(), None);
    }

    #[test]
    fn test_visit_filter_bounds() {
        let visit = VisitRecord {
            identity: MemberId::from("a"),
            display_name: "A".into(),
            check_in: at(10, 0),
            check_out: Some(at(11, 0)),
        };
        assert!(VisitFilter::all().matches(&visit));
        assert!(VisitFilter::since(at(10, 0)).matches(&visit));
        assert!(!VisitFilter::since(at(10, 1)).matches(&visit));
        let until = VisitFilter {
            since: None,
            until: Some(at(10, 0)),
        };
        assert!(!until.matches(&visit));
    }

    #[test]
    fn test_visit_range_rejects_inverted() {
        assert!(VisitRange::new(at(11, 0), at(10, 0)).is_err());
        assert!(VisitRange::new(at(10, 0), at(11, 0)).is_ok());
    }

    #[test]
    fn test_scan_event_accepts_timestamp_alias() {
        let scan: ScanEvent = serde_json::from_value(serde_json::json!({
            "uid": "A1B2",
            "timestamp": "2025-03-10T08:00:00"
        }))
        .unwrap();
        assert_eq!(scan.parsed_time(), Some(at(8, 0)));
        assert_eq!(scan.name, None);
    }
}
