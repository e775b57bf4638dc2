use adapter::{CardStore, CommentStore};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use domain::{BoardList, CommentRecord, RemoteId};
use serde::Serialize;

use super::{parse_id, remote_failure};
use crate::state::AppState;

/// A card together with everything the panel shows about it.
#[derive(Serialize)]
pub struct CardView {
    pub id: RemoteId,
    pub name: String,
    pub desc: String,
    pub comments: Vec<CommentRecord>,
}

#[derive(Serialize)]
pub struct ListCount {
    pub name: String,
    pub total: usize,
}

pub async fn list_lists(
    State(state): State<AppState>,
) -> Result<Json<Vec<BoardList>>, (StatusCode, String)> {
    let lists = state.trello.board_lists().await.map_err(remote_failure)?;
    Ok(Json(lists))
}

pub async fn list_cards(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<Vec<CardView>>, (StatusCode, String)> {
    let list_id = parse_id(list_id)?;
    let cards = state
        .trello
        .cards_in_list(&list_id)
        .await
        .map_err(remote_failure)?;

    let mut views = Vec::with_capacity(cards.len());
    for card in cards {
        let comments = state
            .trello
            .list_comments(&card.id)
            .await
            .map_err(remote_failure)?;
        views.push(CardView {
            id: card.id,
            name: card.name,
            desc: card.desc,
            comments,
        });
    }
    Ok(Json(views))
}

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListCount>>, (StatusCode, String)> {
    let lists = state.trello.board_lists().await.map_err(remote_failure)?;
    let mut counts = Vec::with_capacity(lists.len());
    for list in lists {
        let cards = state
            .trello
            .cards_in_list(&list.id)
            .await
            .map_err(remote_failure)?;
        counts.push(ListCount {
            name: list.name,
            total: cards.len(),
        });
    }
    Ok(Json(counts))
}
