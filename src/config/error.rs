//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Auth authority must use HTTPS in production")]
    AuthorityMustBeHttps,

    #[error("Site URL must use HTTPS in production")]
    SiteUrlMustBeHttps,

    #[error("Callback path must start with '/'")]
    InvalidCallbackPath,

    #[error("Plan allow-list is configured but empty")]
    EmptyAllowList,
}
