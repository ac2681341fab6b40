//! Asset-hash bootstrap.
//!
//! # Data Flow
//! ```text
//! Startup (once, before the listener accepts traffic):
//!     for each supported locale
//!     → manifest.rs (read <static>/dist/manifest_<locale>.json)
//!     → extract bundle / styles / vendor / vendor-styles hashes
//!     → AssetHashTable (immutable, shared via Arc)
//!
//! Per request:
//!     resolved locale → AssetHashTable::get → cache-busted URLs in the page
//! ```
//!
//! # Design Decisions
//! - A broken or missing manifest never aborts startup; the locale is
//!   logged and left out of the table
//! - The table is read-only after construction, so handlers share it
//!   without locks

pub mod manifest;

use std::collections::HashMap;

use crate::config::AssetsConfig;

pub use manifest::{extract_hash, AssetHashes, ChunkAssets, Manifest, ManifestError};

/// Per-locale asset hashes, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct AssetHashTable {
    hashes: HashMap<String, AssetHashes>,
}

impl AssetHashTable {
    /// Read the manifest of every locale. Locales whose manifest fails to
    /// load are skipped with a warning.
    pub fn load<S: AsRef<str>>(config: &AssetsConfig, locales: &[S]) -> Self {
        let mut hashes = HashMap::with_capacity(locales.len());

        for locale in locales.iter().map(AsRef::as_ref) {
            let path = config.manifest_path(locale);
            match AssetHashes::load(&path) {
                Ok(record) => {
                    tracing::debug!(locale, bundle = %record.bundle, "Loaded asset hashes");
                    hashes.insert(locale.to_string(), record);
                }
                Err(e) => {
                    tracing::warn!(locale, error = %e, "Could not load asset manifest, locale excluded");
                }
            }
        }

        tracing::info!(
            loaded = hashes.len(),
            configured = locales.len(),
            "Asset hash table built"
        );

        Self { hashes }
    }

    /// Hashes for a locale, if its manifest loaded.
    pub fn get(&self, locale: &str) -> Option<&AssetHashes> {
        self.hashes.get(locale)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_manifest(root: &std::path::Path, locale: &str, body: &str) {
        let dir = root.join("dist");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("manifest_{locale}.json")), body).unwrap();
    }

    #[test]
    fn test_load_skips_broken_locales() {
        let root = tempfile::tempdir().unwrap();
        write_manifest(
            root.path(),
            "en",
            r#"{"assetsByChunkName": {
                "bundle": ["bundle.aaa.js", "bundle.aaa.js.map"],
                "styles": "styles.bbb.css",
                "vendor": ["vendor.ccc.js", "vendor.ddd.css"]
            }}"#,
        );
        write_manifest(root.path(), "fr", "{ not json");

        let config = AssetsConfig {
            static_path: root.path().to_path_buf(),
            ..AssetsConfig::default()
        };
        let table = AssetHashTable::load(&config, &["en", "fr", "de"]);

        assert_eq!(table.len(), 1);
        let en = table.get("en").unwrap();
        assert_eq!(en.bundle, "aaa");
        assert_eq!(en.styles, "bbb");
        assert_eq!(en.vendor, "ccc");
        assert_eq!(en.vendor_styles, "ddd");
        assert!(table.get("fr").is_none());
        assert!(table.get("de").is_none());
    }
}
