//! Startup orchestration.
//!
//! # Responsibilities
//! - Load locale configuration and translations
//! - Build the asset hash table (tolerating broken manifests)
//! - Compile the page template
//! - Assemble the immutable `AppState`
//!
//! # Design Decisions
//! - Fail fast on what the page cannot render without (locales, template)
//! - Everything runs synchronously, before the listener binds

use std::sync::Arc;

use thiserror::Error;

use crate::assets::AssetHashTable;
use crate::config::ServerConfig;
use crate::http::AppState;
use crate::i18n::{CatalogError, I18n};
use crate::render::{PageRenderer, RenderError};
use crate::routing::RedirectPolicy;
use crate::security::BasicAuthGate;
use crate::translation_status::TranslationStatus;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("locale setup failed: {0}")]
    Locales(#[from] CatalogError),

    #[error("page template setup failed: {0}")]
    Template(#[from] RenderError),
}

/// Load everything handlers share.
pub fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let i18n = I18n::load(&config.i18n)?;
    let assets = AssetHashTable::load(&config.assets, &i18n.locales.locales());
    let renderer = PageRenderer::from_file(&config.render.index_path(), Arc::clone(&i18n.catalog))?;
    let translation_status = TranslationStatus::from_i18n(&i18n);

    Ok(AppState {
        i18n: Arc::new(i18n),
        assets: Arc::new(assets),
        renderer: Arc::new(renderer),
        auth: Arc::new(BasicAuthGate::from_config(&config.security)),
        redirects: Arc::new(RedirectPolicy::from_config(&config.site)),
        translation_status: Arc::new(translation_status),
        api_host: Arc::from(config.site.api_host.as_str()),
    })
}
