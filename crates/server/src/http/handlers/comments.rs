use adapter::reconcile_thread;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::parse_id;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SaveCommentsRequest {
    /// The whole comment thread as the user edited it, one comment per line.
    pub comments: String,
}

/// Reconciles the card's remote thread with the submitted block. A partial
/// failure leaves the already-applied operations in place; resubmitting the
/// same block picks up from a fresh read of the thread.
pub async fn save_comments(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    Json(payload): Json<SaveCommentsRequest>,
) -> Result<Json<String>, (StatusCode, String)> {
    let card_id = parse_id(card_id)?;
    let outcome = reconcile_thread(&*state.trello, &card_id, &payload.comments)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, format!("{e:#}")))?;
    Ok(Json(format!(
        "Comentários atualizados: {} criados, {} editados, {} removidos",
        outcome.created, outcome.edited, outcome.deleted
    )))
}
