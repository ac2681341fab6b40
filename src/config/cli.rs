//! Command line and environment overrides.

use std::path::PathBuf;

use clap::Parser;

use crate::config::schema::{LogFormat, ServerConfig};

/// Command line interface. Every flag can also come from the environment
/// variable named next to it.
#[derive(Debug, Default, Parser)]
#[command(name = "electricitymap-web")]
#[command(about = "Delivery server for the electricityMap web app", long_about = None, version)]
pub struct Cli {
    /// Optional TOML site file.
    #[arg(short, long, env = "SERVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Runtime environment; `production` enables static caching and JSON logs.
    #[arg(long, env = "NODE_ENV")]
    pub node_env: Option<String>,

    /// Directory served as static files.
    #[arg(long, env = "STATIC_PATH")]
    pub static_path: Option<PathBuf>,

    /// Directory holding translation files and the locale configuration.
    #[arg(long, env = "LOCALES_PATH")]
    pub locales_path: Option<PathBuf>,

    /// Directory holding the page template.
    #[arg(long, env = "VIEWS_PATH")]
    pub views_path: Option<PathBuf>,

    /// Comma-separated `name:pass` pairs gating page renders.
    #[arg(long, env = "BASIC_AUTH_CREDENTIALS", hide_env_values = true)]
    pub basic_auth_credentials: Option<String>,

    /// Token set as a cookie once basic auth succeeds.
    #[arg(long, env = "ELECTRICITYMAP_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    /// Prometheus scrape address, e.g. `0.0.0.0:9090`.
    #[arg(long, env = "METRICS_ADDRESS")]
    pub metrics_address: Option<String>,
}

impl Cli {
    /// Whether `NODE_ENV` selects production mode.
    pub fn is_production(&self) -> bool {
        self.node_env
            .as_deref()
            .is_some_and(|env| env.eq_ignore_ascii_case("production"))
    }

    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if self.node_env.is_some() {
            let production = self.is_production();
            config.assets.production = production;
            if production {
                config.observability.log_format = LogFormat::Json;
            }
        }
        if let Some(path) = &self.static_path {
            config.assets.static_path = path.clone();
        }
        if let Some(path) = &self.locales_path {
            config.i18n.locales_path = path.clone();
        }
        if let Some(path) = &self.views_path {
            config.render.views_path = path.clone();
        }
        if let Some(raw) = &self.basic_auth_credentials {
            config.security.basic_auth_credentials = Some(raw.clone());
        }
        if let Some(token) = &self.session_token {
            config.security.session_token = Some(token.clone());
        }
        if let Some(addr) = &self.metrics_address {
            config.observability.metrics_address = Some(addr.clone());
        }
    }
}
