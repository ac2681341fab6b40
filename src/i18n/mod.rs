//! Localization subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     locales_config.json → locales.rs (supported set, Facebook mapping)
//!     <locale>.json       → catalog.rs (translation trees)
//!
//! Per request:
//!     query string + Accept-Language → resolve.rs → active locale
//!     template `__(key, args...)` → catalog.rs (fallback to default)
//!                                 → sprintf.rs (printf-style substitution)
//! ```
//!
//! # Design Decisions
//! - Everything loaded here is immutable after startup
//! - The resolved locale is request scoped and never stored
//! - A missing translation is never an error: it falls back, then renders empty

pub mod catalog;
pub mod locales;
pub mod resolve;
pub mod sprintf;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::config::I18nConfig;

pub use catalog::Catalog;
pub use locales::LocaleConfig;
pub use resolve::{alternate_url, LocaleResolver};
pub use sprintf::sprintf;

/// Errors raised while loading locale data at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("default locale `{0}` is not listed in the locale configuration")]
    UnknownDefault(String),
}

/// Locale configuration, translations and resolver, bundled for handlers.
#[derive(Debug, Clone)]
pub struct I18n {
    pub locales: LocaleConfig,
    pub catalog: Arc<Catalog>,
    pub resolver: LocaleResolver,
}

impl I18n {
    /// Assemble from parts; the default locale must be supported.
    pub fn new(
        locales: LocaleConfig,
        catalog: Catalog,
        config: &I18nConfig,
    ) -> Result<Self, CatalogError> {
        if !locales.is_supported(&config.default_locale) {
            return Err(CatalogError::UnknownDefault(config.default_locale.clone()));
        }
        let resolver = LocaleResolver::new(
            locales.locales(),
            config.default_locale.clone(),
            config.query_parameter.clone(),
            config.facebook_query_parameter.clone(),
        );
        Ok(Self {
            locales,
            catalog: Arc::new(catalog),
            resolver,
        })
    }

    /// Load the locale configuration and every translation tree.
    pub fn load(config: &I18nConfig) -> Result<Self, CatalogError> {
        let locales = LocaleConfig::load(&config.config_path())?;
        let codes = locales.locales();
        let catalog = Catalog::load(&config.locales_path, &codes, &config.default_locale);

        tracing::info!(
            locales = codes.len(),
            default = %config.default_locale,
            "Locales loaded"
        );

        Self::new(locales, catalog, config)
    }

    pub fn default_locale(&self) -> &str {
        self.catalog.default_locale()
    }
}
