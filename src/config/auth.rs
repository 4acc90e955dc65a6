//! Identity provider configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::site::Environment;

/// Identity provider configuration (hosted OAuth login)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Provider authority URL
    pub authority: String,

    /// OAuth2 client ID
    pub client_id: String,

    /// Expected audience for tokens
    pub audience: String,

    /// Redirect URI registered with the provider
    pub redirect_uri: String,

    /// Path of the callback route on the site
    #[serde(default = "default_callback_path")]
    pub callback_path: String,
}

impl AuthConfig {
    /// Validate identity provider configuration
    ///
    /// In production, requires HTTPS for the authority URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.authority.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_AUTHORITY"));
        }
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_CLIENT_ID"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_AUDIENCE"));
        }
        if self.redirect_uri.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_REDIRECT_URI"));
        }
        if !self.callback_path.starts_with('/') {
            return Err(ValidationError::InvalidCallbackPath);
        }

        if *environment == Environment::Production && !self.authority.starts_with("https://") {
            return Err(ValidationError::AuthorityMustBeHttps);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            authority: String::new(),
            client_id: String::new(),
            audience: String::new(),
            redirect_uri: String::new(),
            callback_path: default_callback_path(),
        }
    }
}

fn default_callback_path() -> String {
    "/auth/callback".to_string()
}
