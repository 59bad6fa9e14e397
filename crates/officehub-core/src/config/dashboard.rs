//! Dashboard surface and refresh policy configuration.

use serde::{Deserialize, Serialize};

use crate::types::{CapabilityMode, CommunityId};

/// Dashboard configuration: which communities get which capability mode and
/// how often manual refreshes are allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Title shown on every dashboard document.
    #[serde(default = "default_title")]
    pub title: String,
    /// Communities allowed to host a dashboard, with their capability mode.
    #[serde(default)]
    pub communities: Vec<CommunityConfig>,
    /// Minimum seconds between two accepted manual refreshes by the same
    /// identity on the same surface.
    #[serde(default = "default_cooldown")]
    pub manual_cooldown_seconds: u64,
    /// Timer triggers arriving within this many seconds of a completed cycle
    /// are dropped.
    #[serde(default = "default_timer_skip")]
    pub timer_skip_seconds: u64,
}

/// One community entry in the dashboard mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityConfig {
    /// Chat-platform community (guild) identifier.
    pub community_id: CommunityId,
    /// Capability mode for this community's surface.
    pub mode: CapabilityMode,
}

impl DashboardConfig {
    /// Capability mode configured for a community, if any.
    pub fn mode_for(&self, community: CommunityId) -> Option<CapabilityMode> {
        self.communities
            .iter()
            .find(|c| c.community_id == community)
            .map(|c| c.mode)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            communities: Vec::new(),
            manual_cooldown_seconds: default_cooldown(),
            timer_skip_seconds: default_timer_skip(),
        }
    }
}

fn default_title() -> String {
    "🏢 Office Presence".to_string()
}

fn default_cooldown() -> u64 {
    15
}

fn default_timer_skip() -> u64 {
    15
}
