//! Health, version and translation-status endpoints.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;

/// Version reported by `/clientVersion`: `CLIENT_VERSION` at build time, or
/// the crate version.
pub const CLIENT_VERSION: &str = match option_env!("CLIENT_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

pub async fn client_version() -> &'static str {
    CLIENT_VERSION
}

pub async fn badges(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        state.translation_status.badges_svg(),
    )
}

pub async fn all_locales(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.translation_status.to_json(None))
}

pub async fn one_locale(
    State(state): State<AppState>,
    Path(language): Path<String>,
) -> Json<serde_json::Value> {
    Json(state.translation_status.to_json(Some(&language)))
}
