//! Leaderboard aggregation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use officehub_backend::{VisitFilter, VisitRecord};
use officehub_core::types::MemberId;

/// What the leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total hours spent in the office.
    Hours,
    /// Number of completed visits.
    Visits,
}

impl Metric {
    /// Converts to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Visits => "visits",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hours" => Ok(Self::Hours),
            "visits" => Ok(Self::Visits),
            other => Err(format!("unknown metric '{other}'")),
        }
    }
}

/// Look-back window of a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
    /// Last 120 days.
    Semester,
    /// Everything.
    All,
}

impl Period {
    /// Days covered, `None` when unbounded.
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Semester => Some(120),
            Self::All => None,
        }
    }

    /// Check-in window ending at `now`.
    pub fn window(&self, now: NaiveDateTime) -> VisitFilter {
        match self.days() {
            Some(days) => VisitFilter::since(now - Duration::days(days)),
            None => VisitFilter::all(),
        }
    }

    /// Converts to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Semester => "semester",
            Self::All => "all",
        }
    }

    /// Heading used on leaderboard documents.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Semester => "This Semester",
            Self::All => "All Time",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "semester" => Ok(Self::Semester),
            "all" | "all_time" => Ok(Self::All),
            other => Err(format!("unknown period '{other}'")),
        }
    }
}

/// Aggregated standing of one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// Backend identity.
    pub identity: MemberId,
    /// Name from the member's most recent counted visit.
    pub display_name: String,
    /// Counted visits.
    pub visits: u32,
    /// Summed visit length in seconds.
    pub total_seconds: i64,
    /// Earliest counted check-in, used to break ties.
    pub first_check_in: NaiveDateTime,
}

impl LeaderboardEntry {
    /// Total time as fractional hours.
    pub fn hours(&self) -> f64 {
        self.total_seconds as f64 / 3600.0
    }
}

/// Whether a visit was closed by the backend's automatic sign-out.
///
/// Matches the hour of the check-out against the cutoff hour; minutes and
/// seconds are ignored.
pub fn is_auto_signout(visit: &VisitRecord, cutoff: NaiveTime) -> bool {
    visit
        .check_out
        .is_some_and(|out| out.hour() == cutoff.hour())
}

/// Rank visits by `metric`.
///
/// Auto-signed-out and still-open visits are not counted, but every member
/// with a visit in the window gets an entry; members with nothing counted
/// rank last with zero. Members are sorted by the metric descending, then by
/// earliest check-in, then by identity.
pub fn rank(
    visits: &[VisitRecord],
    metric: Metric,
    cutoff: NaiveTime,
    top_n: usize,
) -> Vec<LeaderboardEntry> {
    let mut totals: HashMap<&MemberId, LeaderboardEntry> = HashMap::new();

    for visit in visits {
        let entry = totals
            .entry(&visit.identity)
            .or_insert_with(|| LeaderboardEntry {
                identity: visit.identity.clone(),
                display_name: visit.display_name.clone(),
                visits: 0,
                total_seconds: 0,
                first_check_in: visit.check_in,
            });
        if visit.check_in < entry.first_check_in {
            entry.first_check_in = visit.check_in;
        } else {
            entry.display_name = visit.display_name.clone();
        }

        if is_auto_signout(visit, cutoff) {
            continue;
        }
        let Some(duration) = visit.duration() else {
            continue;
        };
        entry.visits += 1;
        entry.total_seconds += duration.num_seconds().max(0);
    }

    let mut ranked: Vec<LeaderboardEntry> = totals.into_values().collect();
    ranked.sort_by(|a, b| {
        let by_metric = match metric {
            Metric::Hours => b.total_seconds.cmp(&a.total_seconds),
            Metric::Visits => b.visits.cmp(&a.visits),
        };
        (b.visits > 0)
            .cmp(&(a.visits > 0))
            .then(by_metric)
            .then_with(|| a.first_check_in.cmp(&b.first_check_in))
            .then_with(|| a.identity.cmp(&b.identity))
    });
    ranked.truncate(top_n);
    ranked
}
