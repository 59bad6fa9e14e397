//! Shared-token authentication.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects requests without `Authorization: Bearer <api_token>` when a token
/// is configured. With no token configured every request passes.
pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state
        .config
        .server
        .api_token
        .as_deref()
        .filter(|t| !t.is_empty())
    else {
        return Ok(next.run(request).await);
    };

    let presented = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if presented != Some(expected) {
        tracing::warn!(path = %request.uri().path(), "Rejected request with missing or invalid token");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
