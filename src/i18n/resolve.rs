//! Per-request locale resolution and alternate-locale URLs.
//!
//! # Precedence
//! 1. `fb_locale` query parameter, first segment before `_`
//! 2. `lang` query parameter
//! 3. `Accept-Language` header, highest quality supported tag
//! 4. default locale
//!
//! A candidate outside the supported set falls through to the next source,
//! so the result is always a supported locale.

use std::collections::BTreeSet;

use url::form_urlencoded;

/// Picks the active locale for a request.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    supported: BTreeSet<String>,
    default_locale: String,
    query_parameter: String,
    facebook_query_parameter: String,
}

impl LocaleResolver {
    pub fn new(
        supported: impl IntoIterator<Item = String>,
        default_locale: impl Into<String>,
        query_parameter: impl Into<String>,
        facebook_query_parameter: impl Into<String>,
    ) -> Self {
        Self {
            supported: supported.into_iter().collect(),
            default_locale: default_locale.into(),
            query_parameter: query_parameter.into(),
            facebook_query_parameter: facebook_query_parameter.into(),
        }
    }

    pub fn query_parameter(&self) -> &str {
        &self.query_parameter
    }

    /// Resolve the locale from a raw query string and `Accept-Language` value.
    pub fn resolve(&self, query: Option<&str>, accept_language: Option<&str>) -> String {
        let params: Vec<(String, String)> = query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        let param = |name: &str| {
            params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        let facebook = param(&self.facebook_query_parameter)
            .and_then(|fb| fb.split('_').next())
            .and_then(|code| self.supported_code(code));
        let explicit = || param(&self.query_parameter).and_then(|code| self.supported_code(code));
        let negotiated = || accept_language.and_then(|header| self.negotiate(header));

        facebook
            .or_else(explicit)
            .or_else(negotiated)
            .unwrap_or_else(|| self.default_locale.clone())
    }

    /// Match a code case-insensitively against the supported set.
    fn supported_code(&self, code: &str) -> Option<String> {
        let code = code.trim().to_ascii_lowercase();
        self.supported.contains(&code).then_some(code)
    }

    /// Pick the best supported locale from an `Accept-Language` header.
    /// Full tags (`zh-tw`) are tried before their primary subtag (`zh`).
    fn negotiate(&self, header: &str) -> Option<String> {
        let mut ranges: Vec<(&str, f32)> = header
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.split(';');
                let tag = pieces.next()?.trim();
                let quality = pieces
                    .find_map(|p| p.trim().strip_prefix("q="))
                    .and_then(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (!tag.is_empty() && tag != "*" && quality > 0.0).then_some((tag, quality))
            })
            .collect();
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges.into_iter().find_map(|(tag, _)| {
            self.supported_code(tag).or_else(|| {
                tag.split('-')
                    .next()
                    .and_then(|primary| self.supported_code(primary))
            })
        })
    }
}

/// URL of the current page with the locale parameter switched to `locale`.
///
/// An existing `param=` value is replaced; otherwise `param=locale` is
/// appended with `&` when a query string exists, or `?` when it does not.
pub fn alternate_url(url: &str, param: &str, locale: &str) -> String {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, query),
        None => (url, ""),
    };

    if query.is_empty() {
        return format!("{base}?{param}={locale}");
    }

    let prefix = format!("{param}=");
    let mut replaced = false;
    let pairs: Vec<String> = query
        .split('&')
        .map(|pair| {
            if !replaced && (pair.starts_with(&prefix) || pair == param) {
                replaced = true;
                format!("{param}={locale}")
            } else {
                pair.to_string()
            }
        })
        .collect();

    if replaced {
        format!("{base}?{}", pairs.join("&"))
    } else {
        format!("{base}?{query}&{param}={locale}")
    }
}
