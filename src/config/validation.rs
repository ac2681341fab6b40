//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check value ranges (port, timeouts)
//! - Check the credential list is well formed before it gates anything
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener port must be non-zero")]
    ZeroPort,

    #[error("request timeout must be non-zero")]
    ZeroTimeout,

    #[error("site.{0} must not be empty")]
    EmptyHost(&'static str),

    #[error("i18n.default_locale must not be empty")]
    EmptyDefaultLocale,

    #[error("credential entry `{0}` is not of the form name:pass")]
    MalformedCredential(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let site = &config.site;
    for (name, value) in [
        ("canonical_host", &site.canonical_host),
        ("api_host", &site.api_host),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyHost(name));
        }
    }

    if config.i18n.default_locale.trim().is_empty() {
        errors.push(ValidationError::EmptyDefaultLocale);
    }

    if let Some(raw) = config.security.credentials() {
        errors.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty() && !entry.contains(':'))
                .map(|entry| ValidationError::MalformedCredential(entry.to_string())),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
