//! Shared fixtures for integration tests.
//!
//! Each fixture lays out a throwaway site: static root with per-locale
//! manifests, locale files and a small page template.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response},
    Router,
};
use electricitymap_web::config::ServerConfig;
use electricitymap_web::lifecycle::{build_state, Shutdown};
use electricitymap_web::HttpServer;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const TEMPLATE: &str = r#"<html lang="{{ locale }}">
<title>{{ __('misc.maintitle') }}</title>
{% for alt in alternate_urls %}<link rel="alternate" hreflang="{{ alt.locale }}" href="{{ alt.url }}">
{% endfor %}<script src="dist/bundle.{{ bundle_hash }}.js"></script>
<link href="dist/styles.{{ styles_hash }}.css"><meta property="og:locale" content="{{ fb_locale }}">
<p>{{ __('greeting', 'Paris') }}</p>
</html>"#;

pub struct Fixture {
    pub dir: TempDir,
    pub config: ServerConfig,
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn manifest(hash: &str) -> String {
    format!(
        r#"{{"assetsByChunkName": {{
            "bundle": ["bundle.{hash}.js", "bundle.{hash}.js.map"],
            "styles": "styles.{hash}.css",
            "vendor": ["vendor.{hash}.js", "vendor.{hash}.css"]
        }}}}"#
    )
}

/// Site with `en`, `fr` and `de`. `de` has no manifest.
pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        &root.join("locales/locales_config.json"),
        r#"{
            "languageNames": {"en": "English", "fr": "Français", "de": "Deutsch"},
            "localeToFacebookLocale": {"en": "en_US", "fr": "fr_FR", "de": "de_DE"},
            "supportedFacebookLocales": ["en_US", "fr_FR", "de_DE"]
        }"#,
    );
    write(
        &root.join("locales/en.json"),
        r#"{"misc": {"maintitle": "Live CO2"}, "greeting": "Hello %s", "footer": {"bugs": "Found bugs?"}}"#,
    );
    write(
        &root.join("locales/fr.json"),
        r#"{"misc": {"maintitle": "CO2 en direct"}, "greeting": "Bonjour %s"}"#,
    );
    write(&root.join("locales/de.json"), r#"{"misc": {"maintitle": ""}}"#);

    write(&root.join("views/index.html"), TEMPLATE);

    write(&root.join("public/dist/manifest_en.json"), &manifest("en111"));
    write(&root.join("public/dist/manifest_fr.json"), &manifest("fr222"));
    write(&root.join("public/dist/bundle.en111.js"), "console.log('map');");
    write(&root.join("public/dist/bundle.en111.js.map"), r#"{"version":3}"#);
    write(&root.join("public/dist/vendor.en111.js"), "window.vendor = true;");
    write(&root.join("public/dist/styles.en111.css"), "body { margin: 0; }");
    write(&root.join("public/dist/vendor.en111.css"), ".map { width: 100%; }");
    write(&root.join("public/robots.txt"), "User-agent: *\n");

    let mut config = ServerConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.assets.static_path = root.join("public");
    config.i18n.locales_path = root.join("locales");
    config.render.views_path = root.join("views");

    Fixture { dir, config }
}

/// Router for `config`, driven without a socket.
pub fn router(config: &ServerConfig) -> Router {
    let state = build_state(config).unwrap();
    HttpServer::new(config.clone(), state).router()
}

/// Send one request as if it came from `peer`.
pub async fn send(router: &Router, mut request: Request<Body>, peer: &str) -> Response<Body> {
    let peer: SocketAddr = peer.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));
    router.clone().oneshot(request).await.unwrap()
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request, "127.0.0.1:40000").await
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Start a real server on an ephemeral port.
pub async fn start_server(config: ServerConfig) -> (SocketAddr, Shutdown) {
    let state = build_state(&config).unwrap();
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, state);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });

    (addr, shutdown)
}
