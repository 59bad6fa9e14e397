//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use officehub_core::config::AppConfig;
use officehub_dashboard::{InteractionRouter, SurfaceRegistry, SyncHandle};

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Dashboard surfaces
    pub registry: Arc<SurfaceRegistry>,
    /// Interaction router
    pub interactions: Arc<InteractionRouter>,
    /// Producer side of the refresh loop
    pub sync: SyncHandle,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}
