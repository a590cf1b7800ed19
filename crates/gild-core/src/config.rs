//! Engine configuration
//!
//! Policy knobs that are data rather than code: the valid rating range used
//! by reputation updates. Loaded from TOML by the hosting platform or left
//! at defaults.

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The TOML source failed to parse
    #[error("config parse error: {0}")]
    Parse(String),
    /// Parsed values are not usable
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Engine-wide configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lowest acceptable rating submission
    pub rating_min: u64,
    /// Highest acceptable rating submission
    pub rating_max: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rating_min: 1,
            rating_max: 5,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a TOML string and validate it
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rating_min == 0 {
            return Err(ConfigError::Validation(
                "rating_min must be at least 1".to_string(),
            ));
        }
        if self.rating_min > self.rating_max {
            return Err(ConfigError::Validation(format!(
                "rating_min {} exceeds rating_max {}",
                self.rating_min, self.rating_max
            )));
        }
        Ok(())
    }

    /// True if `rating` lies within the configured valid range
    pub fn rating_in_range(&self, rating: u64) -> bool {
        (self.rating_min..=self.rating_max).contains(&rating)
    }
}
