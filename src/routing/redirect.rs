//! Canonical-host and legacy API redirects.

use crate::config::SiteConfig;
use crate::routing::matcher::{normalize_host, HostMatcher};

/// Decides whether a page request must move to the canonical host.
#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    canonical_host: String,
    staging: HostMatcher,
    redirecting: Vec<HostMatcher>,
    crawler_marker: String,
}

impl RedirectPolicy {
    pub fn from_config(site: &SiteConfig) -> Self {
        let mut redirecting: Vec<HostMatcher> = site
            .alternate_hosts
            .iter()
            .map(HostMatcher::exact)
            .collect();
        if !site.redirect_host_fragment.is_empty() {
            redirecting.push(HostMatcher::contains(&site.redirect_host_fragment));
        }

        Self {
            canonical_host: site.canonical_host.clone(),
            staging: HostMatcher::exact(&site.staging_host),
            redirecting,
            crawler_marker: site.crawler_user_agent.clone(),
        }
    }

    /// The canonical URL for a path and query (`/foo?bar=1`).
    pub fn canonical_url(&self, original_url: &str) -> String {
        format!("https://{}{}", self.canonical_host, original_url)
    }

    /// Whether the user agent is the link-preview crawler exempt from redirects.
    pub fn is_crawler(&self, user_agent: Option<&str>) -> bool {
        !self.crawler_marker.is_empty()
            && user_agent.is_some_and(|ua| ua.contains(&self.crawler_marker))
    }

    /// Redirect target for this request, or `None` to serve it here.
    pub fn decide(
        &self,
        host: Option<&str>,
        user_agent: Option<&str>,
        original_url: &str,
    ) -> Option<String> {
        if self.is_crawler(user_agent) {
            return None;
        }
        let host = normalize_host(host?);
        if self.staging.matches(&host) {
            return None;
        }
        self.redirecting
            .iter()
            .any(|m| m.matches(&host))
            .then(|| self.canonical_url(original_url))
    }
}

/// Target of a legacy `/v1` or `/v2` request on the API host.
pub fn legacy_api_url(api_host: &str, original_url: &str) -> String {
    format!("https://{api_host}{original_url}")
}
