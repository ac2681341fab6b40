//! Route behavior, driven through the router without a socket.

mod common;

use std::path::Path;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use common::{body_string, fixture, get, router, send};

const ALLOWED_PEER: &str = "35.184.238.160:51000";

fn page_request(host: &str, user_agent: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/map?bar=1").header(header::HOST, host);
    if let Some(ua) = user_agent {
        builder = builder.header(header::USER_AGENT, ua);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_and_client_version() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let response = get(&router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");

    let response = get(&router, "/clientVersion").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_string(response).await.is_empty());
}

#[tokio::test]
async fn test_translation_status_covers_every_locale() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let response = get(&router, "/translationstatus").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();

    // `de` has no manifest but is still reported.
    for locale in ["de", "en", "fr"] {
        assert!(body.get(locale).is_some(), "missing {locale}");
    }
    assert_eq!(body["en"]["percentage"], 100);
    assert_eq!(body["de"]["translated"], 0);

    let response = get(&router, "/translationstatus/fr").await;
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["translated"], 2);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_translation_badges() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let response = get(&router, "/translationstatus/badges.svg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    let svg = body_string(response).await;
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Français"));
    assert!(!svg.contains("English"));
}

#[tokio::test]
async fn test_legacy_api_redirect() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let response = get(&router, "/v1/foo?bar=1").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://api.electricitymap.org/v1/foo?bar=1"
    );

    let response = get(&router, "/v2/state").await;
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://api.electricitymap.org/v2/state"
    );

    // An empty tail still belongs to the API host.
    for path in ["/v1/", "/v2/"] {
        let response = get(&router, path).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()[header::LOCATION],
            format!("https://api.electricitymap.org{path}").as_str()
        );
    }
}

#[tokio::test]
async fn test_alternate_host_redirects_unless_crawler() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let response = send(&router, page_request("electricitymap.org", Some("Mozilla/5.0")), "10.0.0.1:1").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://www.electricitymap.org/map?bar=1"
    );

    let crawler = Some("facebookexternalhit/1.1");
    let response = send(&router, page_request("electricitymap.org", crawler), "10.0.0.1:1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&router, page_request("staging.electricitymap.org", None), "10.0.0.1:1").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_page_renders_resolved_locale() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let response = get(&router, "/?lang=fr").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    let html = body_string(response).await;

    assert!(html.contains(r#"<html lang="fr">"#));
    assert!(html.contains("CO2 en direct"));
    assert!(html.contains("Bonjour Paris"));
    assert!(html.contains("dist/bundle.fr222.js"));
    assert!(html.contains(r#"content="fr_FR""#));
    assert!(html.contains(r#"hreflang="de" href="https://www.electricitymap.org/?lang=de""#));
    assert!(html.contains(r#"hreflang="en" href="https://www.electricitymap.org/?lang=en""#));
}

#[tokio::test]
async fn test_page_falls_back_to_default_translations() {
    let fixture = fixture();
    let router = router(&fixture.config);

    // `de` has an empty title and no manifest: default-locale text, empty hashes.
    let response = get(&router, "/?fb_locale=de_DE").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"<html lang="de">"#));
    assert!(html.contains("Live CO2"));
    assert!(html.contains(r#"src="dist/bundle..js""#));
}

#[tokio::test]
async fn test_accept_language_negotiation() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let request = Request::builder()
        .uri("/")
        .header(header::ACCEPT_LANGUAGE, "es-ES, fr-CA;q=0.8, en;q=0.5")
        .body(Body::empty())
        .unwrap();
    let html = body_string(send(&router, request, "10.0.0.1:1").await).await;
    assert!(html.contains(r#"<html lang="fr">"#));
}

#[tokio::test]
async fn test_basic_auth_gate() {
    let mut fixture = fixture();
    fixture.config.security.basic_auth_credentials = Some("alice:secret,bob:hunter2".into());
    fixture.config.security.session_token = Some("tok123".into());
    let router = router(&fixture.config);

    let response = get(&router, "/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    assert_eq!(body_string(response).await, "Access denied");

    let request = |pair: &str| {
        Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, format!("Basic {}", STANDARD.encode(pair)))
            .body(Body::empty())
            .unwrap()
    };

    let response = send(&router, request("bob:wrong"), "10.0.0.1:1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&router, request("bob:hunter2"), "10.0.0.1:1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::SET_COOKIE],
        "electricitymap-token=tok123; Path=/"
    );

    // Status endpoints stay public.
    assert_eq!(get(&router, "/health").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_auth_when_credentials_unset() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let response = get(&router, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_source_maps_require_allow_listed_client() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let response = get(&router, "/dist/bundle.en111.js.map").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Unauthorized");

    let request = Request::builder()
        .uri("/dist/bundle.en111.js.map")
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request, ALLOWED_PEER).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Plain bundles are public.
    assert_eq!(get(&router, "/dist/bundle.en111.js").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_static_cache_headers() {
    let mut fixture = fixture();
    let router_dev = router(&fixture.config);
    let response = get(&router_dev, "/robots.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=0");

    fixture.config.assets.production = true;
    let router_prod = router(&fixture.config);
    let response = get(&router_prod, "/robots.txt").await;
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=86400");

    // Pages are not cached even in production.
    let response = get(&router_prod, "/").await;
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let fixture = fixture();
    let router = router(&fixture.config);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = send(&router, request, "10.0.0.1:1").await;
    assert_eq!(response.headers()["x-request-id"], "abc-123");

    let response = get(&router, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

/// Asset URLs referenced by `src="dist/..."` and `href="dist/..."`.
fn dist_urls(html: &str) -> Vec<String> {
    ["src=\"dist/", "href=\"dist/"]
        .iter()
        .flat_map(|marker| {
            html.match_indices(marker).filter_map(move |(start, _)| {
                let rest = &html[start + marker.len() - "dist/".len()..];
                rest.split('"').next().map(|path| format!("/{path}"))
            })
        })
        .collect()
}

#[tokio::test]
async fn test_shipped_template_links_built_assets() {
    let mut fixture = fixture();
    fixture.config.render.views_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("views");
    let router = router(&fixture.config);

    let response = get(&router, "/?lang=en").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Live CO2"));

    let urls = dist_urls(&html);
    assert_eq!(urls.len(), 4, "{urls:?}");
    assert!(urls.contains(&"/dist/bundle.en111.js".to_string()));

    for url in &urls {
        let response = get(&router, url).await;
        assert_eq!(response.status(), StatusCode::OK, "{url}");
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(!content_type.starts_with("text/html"), "{url} served {content_type}");
    }

    let bundle = get(&router, "/dist/bundle.en111.js").await;
    assert_eq!(body_string(bundle).await, "console.log('map');");
}
