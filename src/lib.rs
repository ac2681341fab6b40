//! electricityMap web delivery server.
//!
//! Serves the static bundles of the web app, renders the localized HTML
//! shell, redirects legacy hosts and API paths, and exposes small status
//! endpoints.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server ──┬─▶ status      /health, /clientVersion, /translationstatus
//!                             ├─▶ legacy      /v1/*, /v2/* ──▶ 301 api host
//!                             ├─▶ security    /dist/*.map allow-list
//!                             ├─▶ static files (cache headers)
//!                             └─▶ page ──▶ routing (canonical redirect)
//!                                      ──▶ i18n (locale) ──▶ security (basic auth)
//!                                      ──▶ render (template + asset hashes)
//!
//!   Built once at startup: config, i18n, assets, render, translation_status
//! ```

pub mod assets;
pub mod config;
pub mod format;
pub mod http;
pub mod i18n;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;
pub mod security;
pub mod translation_status;

pub use config::ServerConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
