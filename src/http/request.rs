//! Request identification and inspection.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Open a tracing span carrying that ID
//! - Extract the routing-relevant parts of a request (host, URL, user agent)
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The ID is echoed back on the response for client-side correlation

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, Uri};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Span for one request, tagged with its ID.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}

/// The parts of a page request the redirect policy and locale resolver use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInfo {
    /// `Host` header, or the URI authority for HTTP/2.
    pub host: Option<String>,
    /// Path and query as received, e.g. `/?lang=fr`.
    pub original_url: String,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
}

impl RequestInfo {
    pub fn from_parts(uri: &Uri, headers: &HeaderMap) -> Self {
        let header_str = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            host: header_str(header::HOST).or_else(|| uri.host().map(str::to_string)),
            original_url: uri
                .path_and_query()
                .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string()),
            user_agent: header_str(header::USER_AGENT),
            accept_language: header_str(header::ACCEPT_LANGUAGE),
        }
    }

    /// Raw query string, if any.
    pub fn query(&self) -> Option<&str> {
        self.original_url
            .split_once('?')
            .map(|(_, query)| query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_info_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("electricitymap.org"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.0"));
        let uri: Uri = "/zone/FR?lang=fr".parse().unwrap();

        let info = RequestInfo::from_parts(&uri, &headers);
        assert_eq!(info.host.as_deref(), Some("electricitymap.org"));
        assert_eq!(info.original_url, "/zone/FR?lang=fr");
        assert_eq!(info.query(), Some("lang=fr"));
        assert_eq!(info.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(info.accept_language, None);
    }

    #[test]
    fn test_request_info_from_authority() {
        let uri: Uri = "https://www.electricitymap.org/".parse().unwrap();
        let info = RequestInfo::from_parts(&uri, &HeaderMap::new());
        assert_eq!(info.host.as_deref(), Some("www.electricitymap.org"));
        assert_eq!(info.original_url, "/");
        assert_eq!(info.query(), None);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let request = Request::new(());
        let mut maker = UuidRequestId;
        let a = maker.make_request_id(&request).unwrap();
        let b = maker.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
