//! Static file serving.
//!
//! Files under the asset root are served with the configured `Cache-Control`.
//! Anything that is not a file falls through to the page handler.

use axum::{
    handler::Handler,
    http::{header, HeaderValue},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};

use crate::config::AssetsConfig;
use crate::http::page::render_page;
use crate::http::server::AppState;

/// Install the static file service as the router's fallback. Misses are
/// rendered by the page handler.
pub fn with_static_files(
    router: Router<AppState>,
    config: &AssetsConfig,
    state: AppState,
) -> Router<AppState> {
    let cache_control = HeaderValue::from_str(&config.cache_control())
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"));

    tracing::info!(
        root = %config.static_path.display(),
        cache_control = ?cache_control,
        "Serving static files"
    );

    let files = ServeDir::new(&config.static_path)
        .append_index_html_on_directories(false)
        .fallback(render_page.with_state(state));

    router.fallback_service(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CACHE_CONTROL,
                cache_control,
            ))
            .service(files),
    )
}
