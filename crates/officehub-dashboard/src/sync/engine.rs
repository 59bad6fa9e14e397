//! One refresh cycle: fetch once, render per surface, publish what changed.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;

use officehub_backend::{AttendanceBackend, PresenceSnapshot};

use crate::publisher::{PublishError, SurfacePublisher};
use crate::registry::{SurfaceRegistry, SurfaceSlot};
use crate::render::PresenceRenderer;
use crate::trigger::RefreshScope;

/// What happened to one surface during a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOutcome {
    /// A message was created or edited.
    Published,
    /// The rendered document matched the last published one.
    Skipped,
    /// The publish failed; the previous state is kept (or cleared when the
    /// message is gone).
    Failed,
}

/// Summary of a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Whether presence was fetched. `false` when no surface was in scope.
    pub fetched: bool,
    /// Surfaces published.
    pub published: usize,
    /// Surfaces left untouched because nothing changed.
    pub skipped: usize,
    /// Surfaces whose publish failed.
    pub failed: usize,
}

impl CycleReport {
    fn record(&mut self, outcome: SurfaceOutcome) {
        match outcome {
            SurfaceOutcome::Published => self.published += 1,
            SurfaceOutcome::Skipped => self.skipped += 1,
            SurfaceOutcome::Failed => self.failed += 1,
        }
    }
}

/// Runs refresh cycles against the registered surfaces.
#[derive(Debug)]
pub struct SyncEngine {
    backend: Arc<dyn AttendanceBackend>,
    publisher: Arc<dyn SurfacePublisher>,
    registry: Arc<SurfaceRegistry>,
    renderer: PresenceRenderer,
}

impl SyncEngine {
    /// Creates a new sync engine.
    pub fn new(
        backend: Arc<dyn AttendanceBackend>,
        publisher: Arc<dyn SurfacePublisher>,
        registry: Arc<SurfaceRegistry>,
        renderer: PresenceRenderer,
    ) -> Self {
        Self {
            backend,
            publisher,
            registry,
            renderer,
        }
    }

    /// The registry this engine publishes to.
    pub fn registry(&self) -> &Arc<SurfaceRegistry> {
        &self.registry
    }

    /// Run one cycle over the surfaces in `scope`.
    pub async fn run_cycle(&self, scope: &RefreshScope) -> CycleReport {
        let targets = self.registry.resolve(scope);
        if targets.is_empty() {
            tracing::debug!(scope = %scope, "No surfaces in scope, skipping cycle");
            return CycleReport::default();
        }

        let snapshot = self.backend.fetch_presence().await;
        if !snapshot.is_ok() {
            tracing::warn!(scope = %scope, "Presence fetch failed, publishing offline state");
        }

        let outcomes = join_all(
            targets
                .iter()
                .map(|slot| self.sync_surface(slot, &snapshot)),
        )
        .await;

        let mut report = CycleReport {
            fetched: true,
            ..CycleReport::default()
        };
        for outcome in outcomes {
            report.record(outcome);
        }

        tracing::info!(
            scope = %scope,
            occupants = snapshot.occupants.len(),
            published = report.published,
            skipped = report.skipped,
            failed = report.failed,
            "Refresh cycle complete"
        );
        report
    }

    /// Render and publish a single surface while holding its lock.
    async fn sync_surface(&self, slot: &SurfaceSlot, snapshot: &PresenceSnapshot) -> SurfaceOutcome {
        let mut state = slot.state.lock().await;
        let document = self.renderer.render(snapshot, slot.mode);
        let hash = document.content_hash();

        if state.message_handle.is_some() && state.last_render_hash == Some(hash) {
            tracing::trace!(surface = %slot.surface_id, "Dashboard unchanged");
            return SurfaceOutcome::Skipped;
        }

        let result = match &state.message_handle {
            None => self
                .publisher
                .create(&slot.surface_id, &document)
                .await
                .map(Some),
            Some(handle) => self
                .publisher
                .edit(&slot.surface_id, handle, &document)
                .await
                .map(|_| None),
        };

        match result {
            Ok(created) => {
                if let Some(handle) = created {
                    tracing::info!(surface = %slot.surface_id, message = %handle, "Dashboard message created");
                    state.message_handle = Some(handle);
                }
                state.last_render_hash = Some(hash);
                state.last_refresh_at = Some(Utc::now());
                SurfaceOutcome::Published
            }
            Err(PublishError::MessageGone) => {
                tracing::warn!(
                    surface = %slot.surface_id,
                    "Dashboard message was deleted, it will be recreated next cycle"
                );
                state.message_handle = None;
                state.last_render_hash = None;
                SurfaceOutcome::Failed
            }
            Err(e) => {
                tracing::error!(surface = %slot.surface_id, error = %e, "Failed to publish dashboard");
                SurfaceOutcome::Failed
            }
        }
    }
}
