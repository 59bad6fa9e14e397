//! Request DTOs.

use serde::{Deserialize, Serialize};

use officehub_core::types::{ChannelId, CommunityId};

/// Body of `POST /api/surfaces`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupSurfaceRequest {
    /// Community that will host the dashboard.
    pub community_id: CommunityId,
    /// Channel the dashboard message is posted in.
    pub channel_id: ChannelId,
}

/// Body of `POST /api/refresh`. An empty body refreshes every surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Community whose dashboard to refresh.
    #[serde(default)]
    pub target: Option<CommunityId>,
}
