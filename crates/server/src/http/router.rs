use super::handlers::{boards, cards, comments, search};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    let methods = [Method::GET, Method::POST, Method::PUT];
    let cors = if allowed_origins == "*" {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_origin(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
            CorsLayer::new()
                .allow_methods(methods)
                .allow_origin(Any)
                .allow_headers(Any)
        } else {
            tracing::info!("CORS enabled for origins: {:?}", origins);
            CorsLayer::new()
                .allow_methods(methods)
                .allow_origin(origins)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route("/api/lists", get(boards::list_lists))
        .route("/api/lists/:list_id/cards", get(boards::list_cards))
        .route("/api/cards", post(cards::create_card))
        .route("/api/cards/:card_id/list", put(cards::move_card))
        .route("/api/cards/:card_id/desc", put(cards::set_description))
        .route("/api/cards/:card_id/comments", put(comments::save_comments))
        .route("/api/search", get(search::run_search))
        .route("/api/dashboard", get(boards::dashboard))
        .layer(cors)
        .with_state(state)
}
