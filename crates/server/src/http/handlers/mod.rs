pub mod boards;
pub mod cards;
pub mod comments;
pub mod search;

use axum::http::StatusCode;
use domain::RemoteId;

/// Path parameters are remote ids typed by the user-facing client; reject
/// anything that is not a plain board identifier.
pub fn parse_id(raw: String) -> Result<RemoteId, (StatusCode, String)> {
    RemoteId::new(raw).map_err(|e| (StatusCode::BAD_REQUEST, e))
}

pub fn remote_failure(e: adapter::StoreError) -> (StatusCode, String) {
    (StatusCode::BAD_GATEWAY, e.to_string())
}
