//! Token storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Token storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path of the persisted token record
    #[serde(default = "default_token_record_path")]
    pub token_record_path: String,
}

impl StorageConfig {
    /// Get the token record path
    pub fn token_record_path(&self) -> PathBuf {
        PathBuf::from(&self.token_record_path)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token_record_path.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_TOKEN_RECORD_PATH"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_record_path: default_token_record_path(),
        }
    }
}

fn default_token_record_path() -> String {
    ".herald/tokens.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.token_record_path, ".herald/tokens.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_path() {
        let config = StorageConfig {
            token_record_path: String::new(),
        };
        assert!(config.validate().is_err());
    }
}
