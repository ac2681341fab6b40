//! Catch-all page handler.
//!
//! # Decision Sequence
//! 1. Canonical-host redirect (skipped for the link-preview crawler)
//! 2. Locale resolution (`fb_locale`, `lang`, `Accept-Language`, default)
//! 3. Basic-auth gate, when credentials are configured
//! 4. Render the page shell for the resolved locale

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use crate::http::request::RequestInfo;
use crate::http::response::{internal_error, moved_permanently};
use crate::http::server::AppState;
use crate::i18n::alternate_url;
use crate::render::{AlternateUrl, PageView};
use crate::security::AuthOutcome;

/// Page responses, including redirects and challenges, are never cached;
/// the static file layer only fills in `Cache-Control` when it is absent.
pub async fn render_page(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let mut response = page_response(&state, &uri, &headers);
    response
        .headers_mut()
        .entry(header::CACHE_CONTROL)
        .or_insert(HeaderValue::from_static("no-cache"));
    response
}

fn page_response(state: &AppState, uri: &Uri, headers: &HeaderMap) -> Response {
    let request = RequestInfo::from_parts(uri, headers);

    if let Some(target) = state.redirects.decide(
        request.host.as_deref(),
        request.user_agent.as_deref(),
        &request.original_url,
    ) {
        tracing::debug!(host = ?request.host, target = %target, "Redirecting to canonical host");
        return moved_permanently(&target);
    }

    let locale = state
        .i18n
        .resolver
        .resolve(request.query(), request.accept_language.as_deref());

    let outcome = state.auth.check(headers);
    if outcome == AuthOutcome::Denied {
        return state.auth.challenge();
    }

    let view = build_view(state, &locale, &request.original_url);
    let html = match state.renderer.render(&view) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(error = %e, locale = %locale, "Failed to render page");
            return internal_error();
        }
    };

    let mut response = (StatusCode::OK, Html(html)).into_response();

    if outcome == AuthOutcome::Granted {
        if let Some(cookie) = state.auth.session_cookie() {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }

    response
}

/// View model for `locale` at `original_url`.
pub fn build_view(state: &AppState, locale: &str, original_url: &str) -> PageView {
    let i18n = &state.i18n;
    let full_url = state.redirects.canonical_url(original_url);
    let supported_locales = i18n.locales.locales();

    let alternate_urls = supported_locales
        .iter()
        .map(|l| AlternateUrl {
            locale: l.clone(),
            url: alternate_url(&full_url, i18n.resolver.query_parameter(), l),
        })
        .collect();

    let hashes = match state.assets.get(locale) {
        Some(hashes) => hashes.clone(),
        None => {
            tracing::warn!(locale, "No asset hashes for locale");
            Default::default()
        }
    };

    PageView {
        locale: locale.to_string(),
        full_url,
        alternate_urls,
        bundle_hash: hashes.bundle,
        styles_hash: hashes.styles,
        vendor_hash: hashes.vendor,
        vendor_styles_hash: hashes.vendor_styles,
        supported_locales,
        language_names: i18n.locales.language_names.clone(),
        fb_locale: i18n.locales.facebook_locale(locale).map(str::to_string),
        supported_fb_locales: i18n.locales.supported_facebook_locales.clone(),
        is_cordova: false,
    }
}
