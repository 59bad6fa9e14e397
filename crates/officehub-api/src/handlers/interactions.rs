//! Interaction forwarding.

use axum::Json;
use axum::extract::State;

use officehub_dashboard::router::{Interaction, InteractionReply};

use crate::state::AppState;

/// POST /api/interactions
///
/// Always answers 200; rejections are carried in the reply body.
pub async fn handle_interaction(
    State(state): State<AppState>,
    Json(interaction): Json<Interaction>,
) -> Json<InteractionReply> {
    Json(state.interactions.handle(interaction).await)
}
