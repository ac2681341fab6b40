//! Page shell rendering.
//!
//! # Responsibilities
//! - Hold the compiled page template
//! - Render a per-request view model (locale, URLs, asset hashes)
//! - Expose `__(key, args...)` to the template, bound to the view's locale
//!
//! # Design Decisions
//! - The template environment is built once and shared read-only
//! - The translation function is created per render and lives only in that
//!   render's context

mod view;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::value::Rest;
use minijinja::{AutoEscape, Environment, ErrorKind, Output, State, Value};
use serde::Serialize;
use thiserror::Error;

use crate::i18n::Catalog;

pub use view::{AlternateUrl, PageView};

/// Template name the page shell is registered under. The `.html` suffix
/// turns on HTML auto-escaping.
pub const INDEX_TEMPLATE: &str = "index.html";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Render context: the view plus the bound translation function.
#[derive(Serialize)]
struct RenderContext<'a> {
    #[serde(flatten)]
    view: &'a PageView,
    #[serde(rename = "__")]
    translate: Value,
}

/// Renders the page shell.
#[derive(Debug)]
pub struct PageRenderer {
    env: Environment<'static>,
    catalog: Arc<Catalog>,
}

impl PageRenderer {
    /// Compile the page template from source.
    pub fn from_source(
        source: impl Into<String>,
        catalog: Arc<Catalog>,
    ) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_formatter(markup_formatter);
        env.add_template_owned(INDEX_TEMPLATE, source.into())?;
        Ok(Self { env, catalog })
    }

    /// Read the page template from disk.
    pub fn from_file(path: &Path, catalog: Arc<Catalog>) -> Result<Self, RenderError> {
        let source = fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Page template loaded");
        Self::from_source(source, catalog)
    }

    pub fn render(&self, view: &PageView) -> Result<String, RenderError> {
        let template = self.env.get_template(INDEX_TEMPLATE)?;
        let context = RenderContext {
            view,
            translate: self.translator(&view.locale),
        };
        Ok(template.render(context)?)
    }

    /// `__(key, args...)` for `locale`. A key missing in both the locale and
    /// the default locale yields `undefined`, which renders empty and is falsy.
    fn translator(&self, locale: &str) -> Value {
        let catalog = Arc::clone(&self.catalog);
        let locale = locale.to_string();
        Value::from_function(move |key: String, args: Rest<Value>| -> Value {
            let args: Vec<String> = args.iter().map(display_arg).collect();
            catalog
                .translate(&locale, &key, &args)
                .map_or(Value::UNDEFINED, Value::from)
        })
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Like minijinja's default formatter, but leaves `/` alone so URLs in
/// `href` and `src` attributes stay readable.
fn markup_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    match value.as_str() {
        Some(text) if matches!(state.auto_escape(), AutoEscape::Html) && !value.is_safe() => out
            .write_str(&escape_markup(text))
            .map_err(|e| minijinja::Error::new(ErrorKind::WriteFailure, "failed to write output").with_source(e)),
        _ => minijinja::escape_formatter(out, state, value),
    }
}

fn display_arg(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn catalog() -> Arc<Catalog> {
        let mut trees = HashMap::new();
        trees.insert(
            "en".to_string(),
            json!({"title": "Live CO2 of %s", "only": {"en": "english"}}),
        );
        trees.insert("fr".to_string(), json!({"title": "CO2 en direct de %s"}));
        Arc::new(Catalog::new("en", trees))
    }

    fn view(locale: &str) -> PageView {
        PageView {
            locale: locale.to_string(),
            full_url: "https://www.electricitymap.org/".to_string(),
            bundle_hash: "abc".to_string(),
            supported_locales: vec!["en".into(), "fr".into()],
            ..PageView::default()
        }
    }

    #[test]
    fn test_translation_bound_to_view_locale() {
        let renderer = PageRenderer::from_source(
            "{{ __('title', 'France') }}|{{ __('only.en') }}|{{ __('nope') }}|{{ bundle_hash }}",
            catalog(),
        )
        .unwrap();

        assert_eq!(
            renderer.render(&view("fr")).unwrap(),
            "CO2 en direct de France|english||abc"
        );
        assert_eq!(
            renderer.render(&view("en")).unwrap(),
            "Live CO2 of France|english||abc"
        );
    }

    #[test]
    fn test_missing_translation_is_falsy() {
        let renderer = PageRenderer::from_source(
            "{% if __('nope') %}yes{% else %}no{% endif %}",
            catalog(),
        )
        .unwrap();
        assert_eq!(renderer.render(&view("fr")).unwrap(), "no");
    }

    #[test]
    fn test_numeric_arguments() {
        let mut trees = HashMap::new();
        trees.insert("en".to_string(), json!({"count": "%d zones"}));
        let renderer = PageRenderer::from_source(
            "{{ __('count', 42) }}",
            Arc::new(Catalog::new("en", trees)),
        )
        .unwrap();
        assert_eq!(renderer.render(&view("en")).unwrap(), "42 zones");
    }

    #[test]
    fn test_urls_escaped_without_mangling_slashes() {
        let renderer =
            PageRenderer::from_source(r#"<a href="{{ full_url }}">{{ __('title', '<b>') }}</a>"#, catalog())
                .unwrap();
        let mut view = view("en");
        view.full_url = "https://www.electricitymap.org/?a=1&lang=en".to_string();
        assert_eq!(
            renderer.render(&view).unwrap(),
            r#"<a href="https://www.electricitymap.org/?a=1&amp;lang=en">Live CO2 of &lt;b&gt;</a>"#
        );
    }

    #[test]
    fn test_invalid_template() {
        assert!(matches!(
            PageRenderer::from_source("{% if %}", catalog()),
            Err(RenderError::Template(_))
        ));
    }
}
