//! Locale configuration file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::i18n::CatalogError;

/// Supported locales with their display names and Facebook equivalents.
///
/// ```json
/// {
///   "languageNames": { "en": "English", "fr": "Français" },
///   "localeToFacebookLocale": { "en": "en_US", "fr": "fr_FR" },
///   "supportedFacebookLocales": ["en_US", "fr_FR"]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfig {
    pub language_names: BTreeMap<String, String>,

    #[serde(default)]
    pub locale_to_facebook_locale: BTreeMap<String, String>,

    #[serde(default)]
    pub supported_facebook_locales: Vec<String>,
}

impl LocaleConfig {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Supported locale codes, sorted.
    pub fn locales(&self) -> Vec<String> {
        self.language_names.keys().cloned().collect()
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.language_names.contains_key(locale)
    }

    pub fn language_name(&self, locale: &str) -> Option<&str> {
        self.language_names.get(locale).map(String::as_str)
    }

    pub fn facebook_locale(&self, locale: &str) -> Option<&str> {
        self.locale_to_facebook_locale
            .get(locale)
            .map(String::as_str)
    }
}
