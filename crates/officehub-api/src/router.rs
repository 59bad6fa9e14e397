//! Route definitions for the OfficeHub HTTP API.
//!
//! All routes are mounted under `/api`. Everything except the health check
//! sits behind the shared-token middleware.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(surface_routes())
        .merge(interaction_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_token,
        ));

    let api_routes = Router::new().merge(protected).merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Dashboard setup and listing
fn surface_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/surfaces",
            get(handlers::surfaces::list_surfaces).post(handlers::surfaces::setup_surface),
        )
        .route("/refresh", post(handlers::refresh::request_refresh))
}

/// Button presses and admin commands
fn interaction_routes() -> Router<AppState> {
    Router::new().route(
        "/interactions",
        post(handlers::interactions::handle_interaction),
    )
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
