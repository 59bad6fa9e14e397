//! Service wiring.
//!
//! [`build_services`] assembles the dashboard engine, its refresh loop and
//! the interaction router from configuration. The caller owns the returned
//! [`SyncRunner`] and decides where it runs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use tower_http::trace::TraceLayer;

use officehub_backend::{AttendanceBackend, BackendClient};
use officehub_core::config::AppConfig;
use officehub_core::result::AppResult;
use officehub_dashboard::publisher::http::ChatApiPublisher;
use officehub_dashboard::sync::SyncRunner;
use officehub_dashboard::{
    InteractionRouter, PresenceRenderer, SurfacePublisher, SurfaceRegistry, SyncEngine, SyncHandle,
};
use officehub_report::ReportEngine;

use crate::router::build_router;
use crate::state::AppState;

/// Everything the server binary needs to run.
#[derive(Debug)]
pub struct Services {
    /// Handler state.
    pub state: AppState,
    /// The refresh loop, not yet started.
    pub runner: SyncRunner,
}

/// Build the production services from configuration.
pub fn build_services(config: AppConfig) -> AppResult<Services> {
    let backend: Arc<dyn AttendanceBackend> = Arc::new(BackendClient::new(&config.backend)?);
    let publisher: Arc<dyn SurfacePublisher> = Arc::new(ChatApiPublisher::new(&config.chat)?);
    wire(config, backend, publisher)
}

/// Build services over caller-supplied backend and publisher.
pub fn wire(
    config: AppConfig,
    backend: Arc<dyn AttendanceBackend>,
    publisher: Arc<dyn SurfacePublisher>,
) -> AppResult<Services> {
    let registry = Arc::new(SurfaceRegistry::new());
    let engine = Arc::new(SyncEngine::new(
        Arc::clone(&backend),
        publisher,
        Arc::clone(&registry),
        PresenceRenderer::new(config.dashboard.title.clone()),
    ));

    let (sync, rx) = SyncHandle::channel();
    let runner = SyncRunner::new(
        engine,
        rx,
        Duration::from_secs(config.dashboard.timer_skip_seconds),
    );

    let reports = ReportEngine::new(Arc::clone(&backend), config.report.clone())?;
    let interactions = Arc::new(InteractionRouter::new(
        backend,
        Arc::clone(&registry),
        reports,
        sync.clone(),
        config.dashboard.clone(),
    ));

    tracing::info!(
        communities = config.dashboard.communities.len(),
        "Dashboard services initialized"
    );

    Ok(Services {
        state: AppState {
            config: Arc::new(config),
            registry,
            interactions,
            sync,
            started_at: Instant::now(),
        },
        runner,
    })
}

/// The HTTP application with request tracing.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}
