//! Surface registry: one dashboard surface per community.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;

use officehub_core::types::{CapabilityMode, CommunityId, MessageHandle, SurfaceId};

use crate::trigger::RefreshScope;

/// Mutable publish state of a surface, guarded by the slot's lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishState {
    /// Handle of the published message, `None` until the first publish.
    pub message_handle: Option<MessageHandle>,
    /// Hash of the last successfully published document.
    pub last_render_hash: Option<u64>,
    /// When the surface was last successfully published.
    pub last_refresh_at: Option<DateTime<Utc>>,
}

/// A registered surface. Holding its lock is the right to publish to it.
#[derive(Debug)]
pub struct SurfaceSlot {
    /// Where the dashboard lives.
    pub surface_id: SurfaceId,
    /// Capability mode, fixed at registration.
    pub mode: CapabilityMode,
    /// Publish state.
    pub state: Mutex<PublishState>,
}

impl SurfaceSlot {
    fn new(surface_id: SurfaceId, mode: CapabilityMode) -> Self {
        Self {
            surface_id,
            mode,
            state: Mutex::new(PublishState::default()),
        }
    }

    /// Point-in-time copy of the slot.
    pub async fn entry(&self) -> SurfaceEntry {
        let state = self.state.lock().await.clone();
        SurfaceEntry {
            surface_id: self.surface_id,
            mode: self.mode,
            message_handle: state.message_handle,
            last_render_hash: state.last_render_hash,
            last_refresh_at: state.last_refresh_at,
        }
    }
}

/// Read-only view of a registered surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceEntry {
    /// Community and channel.
    pub surface_id: SurfaceId,
    /// Capability mode.
    pub mode: CapabilityMode,
    /// Published message handle.
    pub message_handle: Option<MessageHandle>,
    /// Hash of the last successfully published document.
    pub last_render_hash: Option<u64>,
    /// Last successful publish.
    pub last_refresh_at: Option<DateTime<Utc>>,
}

/// Registry of dashboard surfaces keyed by community.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    slots: DashMap<CommunityId, Arc<SurfaceSlot>>,
}

impl SurfaceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the surface for a community, replacing any previous one.
    ///
    /// The new surface starts without a message handle, so the next cycle
    /// creates a fresh dashboard message in `surface_id.channel`.
    pub fn register(&self, surface_id: SurfaceId, mode: CapabilityMode) -> SurfaceEntry {
        let slot = Arc::new(SurfaceSlot::new(surface_id, mode));
        if let Some(previous) = self.slots.insert(surface_id.community, slot) {
            tracing::info!(
                community = %surface_id.community,
                previous = %previous.surface_id,
                surface = %surface_id,
                "Replacing dashboard surface"
            );
        } else {
            tracing::info!(surface = %surface_id, mode = %mode, "Registered dashboard surface");
        }

        SurfaceEntry {
            surface_id,
            mode,
            message_handle: None,
            last_render_hash: None,
            last_refresh_at: None,
        }
    }

    /// The slot registered for a community.
    pub fn get(&self, community: CommunityId) -> Option<Arc<SurfaceSlot>> {
        self.slots.get(&community).map(|s| Arc::clone(s.value()))
    }

    /// Capability mode of a community's surface, if registered.
    pub fn mode(&self, community: CommunityId) -> Option<CapabilityMode> {
        self.slots.get(&community).map(|s| s.mode)
    }

    /// Slots covered by `scope`, ordered by community id.
    pub fn resolve(&self, scope: &RefreshScope) -> Vec<Arc<SurfaceSlot>> {
        let mut slots: Vec<Arc<SurfaceSlot>> = self
            .slots
            .iter()
            .filter(|s| scope.includes(*s.key()))
            .map(|s| Arc::clone(s.value()))
            .collect();
        slots.sort_by_key(|s| s.surface_id);
        slots
    }

    /// Snapshot of every registered surface, ordered by community id.
    pub async fn entries(&self) -> Vec<SurfaceEntry> {
        let mut entries = Vec::new();
        for slot in self.resolve(&RefreshScope::All) {
            entries.push(slot.entry().await);
        }
        entries
    }

    /// Number of registered surfaces.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no surface is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
