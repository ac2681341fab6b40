//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (ServerConfig::default)
//!     → loader.rs (optional TOML site file)
//!     → cli.rs (command line flags and PORT / NODE_ENV / ... environment)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → consumed once by lifecycle::startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults so the server runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{
    AssetsConfig, I18nConfig, ListenerConfig, LogFormat, ObservabilityConfig, RenderConfig,
    SecurityConfig, ServerConfig, SiteConfig,
};
