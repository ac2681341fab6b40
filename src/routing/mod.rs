//! Routing policy subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path, user agent)
//!     → matcher.rs (normalize host, evaluate host/path conditions)
//!     → redirect.rs (canonical-host decision, legacy API target)
//!     → Return: redirect target or serve locally
//! ```
//!
//! # Design Decisions
//! - Policies compiled from config at startup, immutable at runtime
//! - No regex in hot path (prefix / substring matching only)
//! - Deterministic: same input always yields the same decision

pub mod matcher;
pub mod redirect;

pub use matcher::{is_source_map, normalize_host, HostMatcher};
pub use redirect::{legacy_api_url, RedirectPolicy};
