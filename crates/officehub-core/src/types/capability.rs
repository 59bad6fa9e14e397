//! Capability tiers for dashboard surfaces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Permission tier governing which controls a surface exposes.
///
/// The set is closed: `Control` surfaces carry a "leave" button and accept
/// admin commands, `ReadOnly` surfaces only offer "refresh".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityMode {
    /// Leave + refresh controls; admin commands allowed.
    Control,
    /// Refresh control only.
    ReadOnly,
}

impl CapabilityMode {
    /// Whether the surface may sign its callers out.
    pub fn allows_leave(&self) -> bool {
        matches!(self, Self::Control)
    }

    /// Converts to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::ReadOnly => "read_only",
        }
    }
}

impl fmt::Display for CapabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapabilityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "control" => Ok(Self::Control),
            "read_only" | "readonly" | "view_only" => Ok(Self::ReadOnly),
            other => Err(format!("unknown capability mode '{other}'")),
        }
    }
}
