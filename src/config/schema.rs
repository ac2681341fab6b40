//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits so a site file can override any subset of
//! the defaults.

use std::net::IpAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the delivery server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind host, port).
    pub listener: ListenerConfig,

    /// Hostnames, redirect targets and crawler detection.
    pub site: SiteConfig,

    /// Static asset root and manifest layout.
    pub assets: AssetsConfig,

    /// Locale and translation file layout.
    pub i18n: I18nConfig,

    /// Page template location.
    pub render: RenderConfig,

    /// Basic-auth gate and source-map allow-list.
    pub security: SecurityConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port (`PORT`).
    pub port: u16,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ListenerConfig {
    /// Socket address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 30,
        }
    }
}

/// Hostnames the redirect policy and legacy API redirects work with.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Host every known alternate hostname redirects to.
    pub canonical_host: String,

    /// Host that is never redirected.
    pub staging_host: String,

    /// Hosts that redirect to the canonical host (exact match).
    pub alternate_hosts: Vec<String>,

    /// Any host containing this fragment redirects to the canonical host.
    pub redirect_host_fragment: String,

    /// User-Agent substring of the link-preview crawler exempt from redirects.
    pub crawler_user_agent: String,

    /// Host legacy `/v1` and `/v2` paths are sent to.
    pub api_host: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let domain = "electricitymap.org";
        Self {
            canonical_host: format!("www.{domain}"),
            staging_host: format!("staging.{domain}"),
            alternate_hosts: vec![domain.to_string(), format!("live.{domain}")],
            redirect_host_fragment: "electricitymap.tmrow.co".to_string(),
            crawler_user_agent: "facebookexternalhit".to_string(),
            api_host: format!("api.{domain}"),
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Root directory served as static files (`STATIC_PATH`).
    pub static_path: PathBuf,

    /// Production mode (`NODE_ENV=production`) enables long-lived caching.
    pub production: bool,

    /// `max-age` for static files in production, in seconds.
    pub max_age_secs: u64,

    /// Manifest location relative to `static_path`; `{locale}` is substituted.
    pub manifest_pattern: String,
}

impl AssetsConfig {
    /// Path to the build manifest of a locale.
    pub fn manifest_path(&self, locale: &str) -> PathBuf {
        self.static_path
            .join(self.manifest_pattern.replace("{locale}", locale))
    }

    /// `Cache-Control` value for static files.
    pub fn cache_control(&self) -> String {
        if self.production {
            format!("public, max-age={}", self.max_age_secs)
        } else {
            "public, max-age=0".to_string()
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_path: PathBuf::from("public"),
            production: false,
            max_age_secs: 24 * 60 * 60,
            manifest_pattern: "dist/manifest_{locale}.json".to_string(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Directory holding `<locale>.json` translation trees.
    pub locales_path: PathBuf,

    /// Locale configuration file name inside `locales_path`.
    pub config_file: String,

    /// Locale used when nothing else matches, and lookup fallback.
    pub default_locale: String,

    /// Query parameter selecting the locale.
    pub query_parameter: String,

    /// Query parameter carrying a Facebook locale (`fr_FR`).
    pub facebook_query_parameter: String,
}

impl I18nConfig {
    /// Full path of the locale configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.locales_path.join(&self.config_file)
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales_path: PathBuf::from("locales"),
            config_file: "locales_config.json".to_string(),
            default_locale: "en".to_string(),
            query_parameter: "lang".to_string(),
            facebook_query_parameter: "fb_locale".to_string(),
        }
    }
}

/// Page template configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory holding the page template (`VIEWS_PATH`).
    pub views_path: PathBuf,

    /// Template file name of the page shell.
    pub index_template: String,
}

impl RenderConfig {
    pub fn index_path(&self) -> PathBuf {
        self.views_path.join(&self.index_template)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            views_path: PathBuf::from("views"),
            index_template: "index.html".to_string(),
        }
    }
}

/// Access gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Comma-separated `name:pass` pairs (`BASIC_AUTH_CREDENTIALS`).
    /// `None` or blank disables the basic-auth gate.
    pub basic_auth_credentials: Option<String>,

    /// Realm advertised in the `WWW-Authenticate` challenge.
    pub auth_realm: String,

    /// Token set as a cookie after successful basic auth (`ELECTRICITYMAP_TOKEN`).
    pub session_token: Option<String>,

    /// Cookie name carrying the session token.
    pub session_cookie: String,

    /// Client addresses allowed to fetch `/dist/*.map`.
    pub source_map_allow_list: Vec<IpAddr>,

    /// Take the client address from the first `X-Forwarded-For` entry.
    pub trust_forwarded_for: bool,
}

impl SecurityConfig {
    /// Raw credential list, with blank values treated as unset.
    pub fn credentials(&self) -> Option<&str> {
        self.basic_auth_credentials
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            basic_auth_credentials: None,
            auth_realm: "Access to the staging site".to_string(),
            session_token: None,
            session_cookie: "electricitymap-token".to_string(),
            source_map_allow_list: [
                [35, 184, 238, 160],
                [104, 155, 159, 182],
                [104, 155, 149, 19],
                [130, 211, 230, 102],
            ]
            .into_iter()
            .map(IpAddr::from)
            .collect(),
            trust_forwarded_for: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Prometheus scrape endpoint; disabled when `None`.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "electricitymap_web=info,tower_http=info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_address: None,
        }
    }
}

