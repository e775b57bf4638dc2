use adapter::CardStore;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::{parse_id, remote_failure};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateCardRequest {
    pub name: String,
    pub list_id: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Deserialize)]
pub struct MoveCardRequest {
    pub list_id: String,
}

#[derive(Deserialize)]
pub struct DescriptionRequest {
    pub text: String,
}

pub async fn create_card(
    State(state): State<AppState>,
    Json(payload): Json<CreateCardRequest>,
) -> Result<Json<String>, (StatusCode, String)> {
    let list_id = parse_id(payload.list_id)?;
    let card = state
        .trello
        .create_card(&payload.name, &list_id, &payload.desc)
        .await
        .map_err(remote_failure)?;
    Ok(Json(format!("Cartão criado: {}", card.name)))
}

pub async fn move_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    Json(payload): Json<MoveCardRequest>,
) -> Result<Json<&'static str>, (StatusCode, String)> {
    let card_id = parse_id(card_id)?;
    let list_id = parse_id(payload.list_id)?;
    state
        .trello
        .move_card(&card_id, &list_id)
        .await
        .map_err(remote_failure)?;
    Ok(Json("Cartão movido"))
}

pub async fn set_description(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    Json(payload): Json<DescriptionRequest>,
) -> Result<Json<&'static str>, (StatusCode, String)> {
    let card_id = parse_id(card_id)?;
    state
        .trello
        .set_description(&card_id, &payload.text)
        .await
        .map_err(remote_failure)?;
    Ok(Json("Descrição atualizada"))
}
