//! View model handed to the page template.

use std::collections::BTreeMap;

use serde::Serialize;

/// The page URL with the locale switched to `locale`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateUrl {
    pub locale: String,
    pub url: String,
}

/// Everything the page template can reference besides `__`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageView {
    /// Resolved locale of this request.
    pub locale: String,
    /// Canonical URL of the current page.
    pub full_url: String,
    pub alternate_urls: Vec<AlternateUrl>,
    pub bundle_hash: String,
    pub styles_hash: String,
    pub vendor_hash: String,
    pub vendor_styles_hash: String,
    pub supported_locales: Vec<String>,
    pub language_names: BTreeMap<String, String>,
    /// Facebook locale of `locale`, e.g. `fr_FR`.
    pub fb_locale: Option<String>,
    pub supported_fb_locales: Vec<String>,
    pub is_cordova: bool,
}
