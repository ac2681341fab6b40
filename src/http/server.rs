//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers, in registration order
//! - Wire up middleware (request ID, tracing, metrics, timeout, compression)
//! - Gate source maps before static serving
//! - Bind server to listener and drain on shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::assets::AssetHashTable;
use crate::config::ServerConfig;
use crate::http::request::{make_request_span, UuidRequestId, X_REQUEST_ID};
use crate::http::{assets, legacy, status};
use crate::i18n::I18n;
use crate::observability::metrics;
use crate::render::PageRenderer;
use crate::routing::RedirectPolicy;
use crate::security::{source_map_gate, BasicAuthGate, SourceMapGate};
use crate::translation_status::TranslationStatus;

/// Application state injected into handlers. Everything in it is built
/// before the listener accepts connections and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub i18n: Arc<I18n>,
    pub assets: Arc<AssetHashTable>,
    pub renderer: Arc<PageRenderer>,
    pub auth: Arc<BasicAuthGate>,
    pub redirects: Arc<RedirectPolicy>,
    pub translation_status: Arc<TranslationStatus>,
    pub api_host: Arc<str>,
}

/// HTTP server for the web app.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let source_maps = Arc::new(SourceMapGate::from_config(&config.security));

        let routes = Router::new()
            .route("/health", get(status::health))
            .route("/clientVersion", get(status::client_version))
            .route("/translationstatus/badges.svg", get(status::badges))
            .route("/translationstatus", get(status::all_locales))
            .route("/translationstatus/{language}", get(status::one_locale))
            .route("/v1/", get(legacy::redirect_to_api))
            .route("/v1/{*rest}", get(legacy::redirect_to_api))
            .route("/v2/", get(legacy::redirect_to_api))
            .route("/v2/{*rest}", get(legacy::redirect_to_api));

        assets::with_static_files(routes, &config.assets, state.clone())
            .layer(middleware::from_fn_with_state(source_maps, source_map_gate))
            .layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.listener.request_timeout_secs,
                    )))
                    .layer(CompressionLayer::new()),
            )
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            production = self.config.assets.production,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
