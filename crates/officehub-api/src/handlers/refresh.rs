//! Operator-requested refresh.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;

use officehub_core::error::AppError;
use officehub_dashboard::RefreshTrigger;

use crate::dto::request::RefreshRequest;
use crate::dto::response::{ApiResponse, RefreshQueuedResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/refresh
///
/// An empty body refreshes every surface.
pub async fn request_refresh(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<RefreshQueuedResponse>>), ApiError> {
    let req: RefreshRequest = if body.iter().all(u8::is_ascii_whitespace) {
        RefreshRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::validation(format!("Invalid refresh request: {e}")))?
    };

    if let Some(target) = req.target {
        if state.registry.get(target).is_none() {
            return Err(AppError::not_found(format!("Community {target} has no dashboard")).into());
        }
    }

    let queued = state.sync.submit(RefreshTrigger::admin(None, req.target));
    if !queued {
        return Err(AppError::internal("Refresh loop is not running").into());
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::ok(RefreshQueuedResponse { queued })),
    ))
}
