//! Host and path matching.
//!
//! # Responsibilities
//! - Match host header (exact or substring, case-insensitive)
//! - Recognise source-map paths under `/dist/`
//!
//! # Design Decisions
//! - Host matching is case-insensitive and ignores a `:port` suffix
//! - Path matching is case-sensitive
//! - No regex: plain prefix/suffix/substring checks

/// Lowercase a Host header value and drop any port.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let without_port = if host.starts_with('[') {
        // IPv6 literal: keep everything up to the closing bracket.
        host.split_once(']')
            .map_or(host, |(addr, _)| &host[..addr.len() + 1])
    } else {
        host.rsplit_once(':')
            .filter(|(_, port)| port.chars().all(|c| c.is_ascii_digit()))
            .map_or(host, |(name, _)| name)
    };
    without_port.to_ascii_lowercase()
}

/// A condition on the request host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMatcher {
    /// Host equals the pattern.
    Exact(String),
    /// Host contains the pattern.
    Contains(String),
}

impl HostMatcher {
    pub fn exact(host: impl Into<String>) -> Self {
        Self::Exact(host.into().to_ascii_lowercase())
    }

    pub fn contains(fragment: impl Into<String>) -> Self {
        Self::Contains(fragment.into().to_ascii_lowercase())
    }

    /// `host` must already be normalized.
    pub fn matches(&self, host: &str) -> bool {
        match self {
            HostMatcher::Exact(expected) => host == expected,
            HostMatcher::Contains(fragment) => !fragment.is_empty() && host.contains(fragment),
        }
    }
}

/// Whether `path` names a source map under `/dist/`.
pub fn is_source_map(path: &str) -> bool {
    path.starts_with("/dist/") && path.ends_with(".map")
}
