//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Any request:
//!     → access_control.rs (source-map paths: client IP allow-list)
//!
//! Page request:
//!     → basic_auth.rs (optional credential gate, session cookie)
//!     → Pass to rendering
//! ```
//!
//! # Design Decisions
//! - Fail closed: a source map without a known client address is refused
//! - The basic-auth gate is off unless credentials are configured

pub mod access_control;
pub mod basic_auth;

pub use access_control::{source_map_gate, SourceMapGate};
pub use basic_auth::{parse_credentials, AuthOutcome, BasicAuthGate, Credential};
