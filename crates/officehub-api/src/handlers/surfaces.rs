//! Dashboard surface handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use officehub_core::error::AppError;
use officehub_core::types::SurfaceId;
use officehub_dashboard::{RefreshTrigger, SurfaceEntry};

use crate::dto::request::SetupSurfaceRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/surfaces
pub async fn list_surfaces(State(state): State<AppState>) -> Json<ApiResponse<Vec<SurfaceEntry>>> {
    Json(ApiResponse::ok(state.registry.entries().await))
}

/// POST /api/surfaces
///
/// Registers (or replaces) a community's dashboard and queues its first
/// publish. The community must be listed in the dashboard configuration.
pub async fn setup_surface(
    State(state): State<AppState>,
    Json(req): Json<SetupSurfaceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SurfaceEntry>>), ApiError> {
    let mode = state
        .config
        .dashboard
        .mode_for(req.community_id)
        .ok_or_else(|| {
            AppError::not_found(format!(
                "Community {} is not configured for a dashboard",
                req.community_id
            ))
        })?;

    let entry = state
        .registry
        .register(SurfaceId::new(req.community_id, req.channel_id), mode);

    if !state
        .sync
        .submit(RefreshTrigger::admin(None, Some(req.community_id)))
    {
        return Err(AppError::internal("Refresh loop is not running").into());
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(entry))))
}
