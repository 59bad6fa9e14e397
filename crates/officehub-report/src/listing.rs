//! Identifiers for paginated listings, round-tripped through pager controls.

use std::fmt;
use std::str::FromStr;

use crate::leaderboard::{Metric, Period};

/// Prefix of every pager control id.
const PAGE_PREFIX: &str = "page:";

/// A paginated listing, with the arguments needed to rebuild any page of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKey {
    /// Registered members.
    Members,
    /// The most recent `limit` visits.
    History {
        /// Visits included.
        limit: usize,
    },
    /// Raw badge scans.
    Scans,
    /// A leaderboard.
    Leaderboard {
        /// Ranking metric.
        metric: Metric,
        /// Look-back window.
        period: Period,
        /// Entries ranked.
        top_n: usize,
    },
}

impl ListingKey {
    /// Control id of the pager button that opens `page`.
    pub fn page_id(&self, page: usize) -> String {
        format!("{PAGE_PREFIX}{self}:{page}")
    }

    /// Parse a pager control id back into its listing and page.
    pub fn parse_page_id(custom_id: &str) -> Option<(ListingKey, usize)> {
        let rest = custom_id.strip_prefix(PAGE_PREFIX)?;
        let (key, page) = rest.rsplit_once(':')?;
        Some((key.parse().ok()?, page.parse().ok()?))
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Members => write!(f, "members"),
            Self::History { limit } => write!(f, "history.{limit}"),
            Self::Scans => write!(f, "scans"),
            Self::Leaderboard {
                metric,
                period,
                top_n,
            } => write!(f, "lb.{metric}.{period}.{top_n}"),
        }
    }
}

impl FromStr for ListingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let invalid = || format!("invalid listing key '{s}'");
        match parts.as_slice() {
            ["members"] => Ok(Self::Members),
            ["scans"] => Ok(Self::Scans),
            ["history", limit] => Ok(Self::History {
                limit: limit.parse().map_err(|_| invalid())?,
            }),
            ["lb", metric, period, top_n] => Ok(Self::Leaderboard {
                metric: metric.parse()?,
                period: period.parse()?,
                top_n: top_n.parse().map_err(|_| invalid())?,
            }),
            _ => Err(invalid()),
        }
    }
}
