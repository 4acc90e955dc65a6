//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `HERALD_` prefix and nested values use underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use herald_access::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Site: {}", config.site.site_url);
//! ```

mod auth;
mod backend;
mod error;
mod paywall;
mod portal;
mod site;
mod storage;

pub use auth::AuthConfig;
pub use backend::BackendConfig;
pub use error::{ConfigError, ValidationError};
pub use paywall::PaywallConfig;
pub use portal::PortalConfig;
pub use site::{Environment, SiteConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Herald access script.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Site configuration (public URL, environment, logging)
    pub site: SiteConfig,

    /// Identity provider configuration (hosted OAuth login)
    pub auth: AuthConfig,

    /// Backend token service configuration
    pub backend: BackendConfig,

    /// Billing portal configuration
    pub portal: PortalConfig,

    /// Paywall configuration (plan allow-list)
    #[serde(default)]
    pub paywall: PaywallConfig,

    /// Token storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HERALD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HERALD__SITE__SITE_URL=...` -> `site.site_url = ...`
    /// - `HERALD__BACKEND__BASE_URL=...` -> `backend.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HERALD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.site.validate()?;
        self.auth.validate(&self.site.environment)?;
        self.backend.validate()?;
        self.portal.validate()?;
        self.paywall.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.site.is_production()
    }
}
