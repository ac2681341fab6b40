//! Translation completeness summaries.
//!
//! # Responsibilities
//! - Flatten every translation tree into dotted leaf keys
//! - Compare each locale against the default locale's keys
//! - Render the summaries as JSON and as an SVG badge list
//!
//! # Design Decisions
//! - Computed once at startup from the immutable catalog
//! - Unknown locales still produce a summary (nothing translated)
//! - The default locale is the reference and gets no badge

mod badge;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::i18n::I18n;

pub use badge::render_badges;

/// Completeness of one locale relative to the default locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocaleStatus {
    /// Reference keys this locale translates.
    pub translated: usize,
    /// Number of reference keys.
    pub total: usize,
    /// `translated / total`, rounded to a whole percent.
    pub percentage: u32,
    /// Reference keys this locale lacks, sorted.
    pub missing: Vec<String>,
}

impl LocaleStatus {
    fn compare(reference: &BTreeSet<String>, keys: &BTreeSet<String>) -> Self {
        let missing: Vec<String> = reference.difference(keys).cloned().collect();
        let total = reference.len();
        let translated = total - missing.len();
        Self {
            translated,
            total,
            percentage: percentage(translated, total),
            missing,
        }
    }

    /// Fraction translated, `1.0` when there is nothing to translate.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.translated as f64 / self.total as f64
        }
    }
}

fn percentage(translated: usize, total: usize) -> u32 {
    if total == 0 {
        100
    } else {
        ((translated as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Precomputed summaries for every supported locale.
#[derive(Debug, Clone)]
pub struct TranslationStatus {
    default_locale: String,
    reference: BTreeSet<String>,
    statuses: BTreeMap<String, LocaleStatus>,
    language_names: BTreeMap<String, String>,
}

impl TranslationStatus {
    pub fn from_i18n(i18n: &I18n) -> Self {
        let default_locale = i18n.default_locale().to_string();
        let reference = i18n
            .catalog
            .tree(&default_locale)
            .map(leaf_keys)
            .unwrap_or_default();

        let statuses = i18n
            .locales
            .locales()
            .into_iter()
            .map(|locale| {
                let keys = i18n.catalog.tree(&locale).map(leaf_keys).unwrap_or_default();
                let status = LocaleStatus::compare(&reference, &keys);
                (locale, status)
            })
            .collect();

        Self {
            default_locale,
            reference,
            statuses,
            language_names: i18n.locales.language_names.clone(),
        }
    }

    /// Summary for one locale; unknown locales report nothing translated.
    pub fn locale(&self, locale: &str) -> LocaleStatus {
        self.statuses
            .get(locale)
            .cloned()
            .unwrap_or_else(|| LocaleStatus::compare(&self.reference, &BTreeSet::new()))
    }

    /// Summaries of every supported locale.
    pub fn all(&self) -> &BTreeMap<String, LocaleStatus> {
        &self.statuses
    }

    /// JSON for one locale, or for all of them when `locale` is `None`.
    pub fn to_json(&self, locale: Option<&str>) -> Value {
        let result = match locale {
            Some(locale) => serde_json::to_value(self.locale(locale)),
            None => serde_json::to_value(self.all()),
        };
        result.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize translation status");
            Value::Object(Default::default())
        })
    }

    /// SVG badges for every locale except the default one.
    pub fn badges_svg(&self) -> String {
        let rows: Vec<(&str, &LocaleStatus)> = self
            .statuses
            .iter()
            .filter(|(locale, _)| **locale != self.default_locale)
            .map(|(locale, status)| {
                let name = self
                    .language_names
                    .get(locale)
                    .map_or(locale.as_str(), String::as_str);
                (name, status)
            })
            .collect();
        render_badges(&rows)
    }
}

/// Dotted paths of every non-object value in a translation tree.
pub fn leaf_keys(tree: &Value) -> BTreeSet<String> {
    fn walk(node: &Value, prefix: &str, out: &mut BTreeSet<String>) {
        match node {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    walk(child, &path, out);
                }
            }
            Value::Null => {}
            Value::String(s) if s.is_empty() => {}
            _ => {
                out.insert(prefix.to_string());
            }
        }
    }

    let mut out = BTreeSet::new();
    walk(tree, "", &mut out);
    out
}
