//! Source-map access control.
//! Only allow-listed client addresses may download `/dist/*.map`.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::SecurityConfig;
use crate::routing::is_source_map;

/// State required by the source-map gate.
#[derive(Debug, Clone)]
pub struct SourceMapGate {
    allow_list: Vec<IpAddr>,
    trust_forwarded_for: bool,
}

impl SourceMapGate {
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self {
            allow_list: config.source_map_allow_list.clone(),
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }

    pub fn is_allowed(&self, ip: IpAddr) -> bool {
        self.allow_list.contains(&ip.to_canonical())
    }

    /// Client address: the socket peer, or the first `X-Forwarded-For` entry
    /// when the deployment sits behind a trusted proxy.
    pub fn client_ip(&self, peer: Option<SocketAddr>, headers: &HeaderMap) -> Option<IpAddr> {
        if self.trust_forwarded_for {
            let forwarded = headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .and_then(|v| v.trim().parse::<IpAddr>().ok());
            if forwarded.is_some() {
                return forwarded;
            }
        }
        peer.map(|addr| addr.ip())
    }
}

pub async fn source_map_gate(
    State(gate): State<Arc<SourceMapGate>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !is_source_map(request.uri().path()) {
        return next.run(request).await;
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    match gate.client_ip(peer, request.headers()) {
        Some(ip) if gate.is_allowed(ip) => next.run(request).await,
        client => {
            tracing::warn!(
                client = ?client,
                path = %request.uri().path(),
                "Source map request from unlisted address"
            );
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Unauthorized" })),
            )
                .into_response()
        }
    }
}
