//! Site configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Site configuration (public URL, environment, logging)
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Public URL of the publisher site
    pub site_url: String,

    /// Environment name
    #[serde(default)]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl SiteConfig {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate site configuration
    ///
    /// In production, requires HTTPS for the site URL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.site_url.is_empty() {
            return Err(ValidationError::MissingRequired("SITE_URL"));
        }
        if !self.site_url.starts_with("http://") && !self.site_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("SITE_URL"));
        }
        if self.is_production() && !self.site_url.starts_with("https://") {
            return Err(ValidationError::SiteUrlMustBeHttps);
        }
        Ok(())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            environment: Environment::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info,herald_access=debug".to_string()
}
