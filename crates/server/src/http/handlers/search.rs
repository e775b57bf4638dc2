use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    /// Comma-separated subset of `word,excel`; both by default.
    #[serde(default = "default_sources")]
    pub sources: String,
}

fn default_sources() -> String {
    "word,excel".to_string()
}

#[derive(Serialize)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excel: Option<Vec<search::SheetMatches>>,
}

pub async fn run_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let wanted: Vec<&str> = params.sources.split(',').map(str::trim).collect();
    let sources = state.sources.clone();
    let term = params.q.clone();
    let in_word = wanted.contains(&"word");
    let in_excel = wanted.contains(&"excel");

    // File parsing is blocking work; keep it off the runtime threads.
    let response = tokio::task::spawn_blocking(move || -> anyhow::Result<SearchResponse> {
        let word = if in_word {
            Some(search::search_document(&sources.word_path, &term)?)
        } else {
            None
        };
        let excel = if in_excel {
            Some(search::search_workbook(&sources.sheet_path, &term)?)
        } else {
            None
        };
        Ok(SearchResponse { word, excel })
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;

    Ok(Json(response))
}
