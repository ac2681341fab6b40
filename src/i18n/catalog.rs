//! Translation trees and key lookup with default-locale fallback.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::i18n::sprintf::sprintf;

/// Translation trees for every supported locale. Immutable after startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    default_locale: String,
    trees: HashMap<String, Value>,
}

impl Catalog {
    /// Build a catalog from already parsed trees.
    pub fn new(default_locale: impl Into<String>, trees: HashMap<String, Value>) -> Self {
        Self {
            default_locale: default_locale.into(),
            trees,
        }
    }

    /// Read `<dir>/<locale>.json` for every locale. A missing or invalid file
    /// leaves that locale without translations; lookups then fall back.
    pub fn load<S: AsRef<str>>(dir: &Path, locales: &[S], default_locale: &str) -> Self {
        let mut trees = HashMap::with_capacity(locales.len());

        for locale in locales.iter().map(AsRef::as_ref) {
            let path = dir.join(format!("{locale}.json"));
            let tree = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())
                });

            match tree {
                Ok(tree) => {
                    trees.insert(locale.to_string(), tree);
                }
                Err(error) => {
                    tracing::warn!(locale, path = %path.display(), %error, "Translations unavailable");
                }
            }
        }

        Self::new(default_locale, trees)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Translation tree of a locale, if one loaded.
    pub fn tree(&self, locale: &str) -> Option<&Value> {
        self.trees.get(locale)
    }

    /// Walk `key` (dot separated) in a single locale without fallback.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(self.tree(locale)?, |node, segment| node.get(segment))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Translate `key` for `locale`, falling back to the default locale, and
    /// substitute `args`. `None` when neither locale has the key.
    pub fn translate<S: AsRef<str>>(&self, locale: &str, key: &str, args: &[S]) -> Option<String> {
        let template = self.lookup(locale, key).or_else(|| {
            if locale == self.default_locale {
                None
            } else {
                self.lookup(&self.default_locale, key)
            }
        });

        match template {
            Some(template) => Some(sprintf(template, args)),
            None => {
                tracing::debug!(locale, key, "Missing translation");
                None
            }
        }
    }
}
