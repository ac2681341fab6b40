//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, host / URL / user agent)
//!     → status.rs     /health, /clientVersion, /translationstatus[...]
//!     → legacy.rs     /v1/*, /v2/*  → 301 to the API host
//!     → assets.rs     static files (source maps gated first)
//!     → page.rs       everything else: redirect, auth gate, render
//!     → response.rs (redirect / error helpers)
//! ```

pub mod assets;
pub mod legacy;
pub mod page;
pub mod request;
pub mod response;
pub mod server;
pub mod status;

pub use request::{RequestInfo, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
