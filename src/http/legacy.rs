//! Legacy `/v1` and `/v2` API paths, now served by the API host.

use axum::{extract::State, http::Uri, response::Response};

use crate::http::response::moved_permanently;
use crate::http::server::AppState;
use crate::routing::legacy_api_url;

pub async fn redirect_to_api(State(state): State<AppState>, uri: Uri) -> Response {
    let original_url = uri.path_and_query().map_or("/", |pq| pq.as_str());
    let target = legacy_api_url(&state.api_host, original_url);
    tracing::debug!(target = %target, "Redirecting legacy API request");
    moved_permanently(&target)
}
