//! HTTP Basic-Auth gate for page renders.
//!
//! # Responsibilities
//! - Parse the `name:pass` credential list from configuration
//! - Decode `Authorization: Basic ...` headers
//! - Produce the 401 challenge and the session cookie
//!
//! # Design Decisions
//! - No credential list configured means the gate is open
//! - Any configured pair matching grants access

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::SecurityConfig;

/// A name/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credential {
    /// Split `name:pass` on the first colon.
    pub fn parse(entry: &str) -> Option<Self> {
        let (name, password) = entry.split_once(':')?;
        Some(Self {
            name: name.to_string(),
            password: password.to_string(),
        })
    }

    /// Decode the value of an `Authorization: Basic` header.
    pub fn from_authorization(value: &HeaderValue) -> Option<Self> {
        let value = value.to_str().ok()?.trim();
        let (scheme, encoded) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        Self::parse(std::str::from_utf8(&decoded).ok()?)
    }
}

/// Parse a comma-separated credential list. Malformed entries are skipped
/// (configuration validation reports them before startup).
pub fn parse_credentials(raw: &str) -> Vec<Credential> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(Credential::parse)
        .collect()
}

/// Result of checking a request against the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// No credentials configured; nothing to check.
    Open,
    /// Credentials matched; attach the session cookie if there is one.
    Granted,
    /// Missing or wrong credentials.
    Denied,
}

/// Basic-auth gate built from configuration.
#[derive(Debug, Clone)]
pub struct BasicAuthGate {
    credentials: Vec<Credential>,
    realm: String,
    session_token: Option<String>,
    session_cookie: String,
}

impl BasicAuthGate {
    pub fn from_config(config: &SecurityConfig) -> Self {
        let credentials = config.credentials().map(parse_credentials).unwrap_or_default();
        if !credentials.is_empty() {
            tracing::info!(users = credentials.len(), "Basic auth gate enabled");
        }
        Self {
            credentials,
            realm: config.auth_realm.clone(),
            session_token: config.session_token.clone(),
            session_cookie: config.session_cookie.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.credentials.is_empty()
    }

    pub fn check(&self, headers: &HeaderMap) -> AuthOutcome {
        if !self.is_enabled() {
            return AuthOutcome::Open;
        }

        let supplied = headers
            .get(header::AUTHORIZATION)
            .and_then(Credential::from_authorization);

        match supplied {
            Some(user) if self.credentials.contains(&user) => {
                tracing::debug!(user = %user.name, "Basic auth accepted");
                AuthOutcome::Granted
            }
            Some(user) => {
                tracing::warn!(user = %user.name, "Basic auth rejected");
                AuthOutcome::Denied
            }
            None => AuthOutcome::Denied,
        }
    }

    /// 401 response asking the browser for credentials.
    pub fn challenge(&self) -> Response {
        let challenge = format!("Basic realm=\"{}\"", self.realm.replace('"', "'"));
        let mut response = (StatusCode::UNAUTHORIZED, "Access denied").into_response();
        if let Ok(value) = HeaderValue::from_str(&challenge) {
            response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
        }
        response
    }

    /// `Set-Cookie` value carrying the session token, if one is configured.
    pub fn session_cookie(&self) -> Option<HeaderValue> {
        let token = self.session_token.as_deref()?;
        HeaderValue::from_str(&format!("{}={}; Path=/", self.session_cookie, token)).ok()
    }
}
