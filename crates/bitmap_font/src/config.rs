//! # Unified Configuration System
//!
//! Configuration for the font engine's limits: the highest glyph id a
//! descriptor may declare and the display-cache capacity. Defaults
//! reproduce the stock limits, so most hosts never construct one of
//! these explicitly.

use serde::{Deserialize, Serialize};

use crate::font::DEFAULT_MAX_GLYPH_ID;
use crate::render::DEFAULT_CACHE_CAPACITY;

/// Errors that can occur while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML text failed to parse
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration failed to serialize
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field failed validation
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Engine limits
///
/// `max_glyph_id` bounds the dense glyph table (descriptors declaring a
/// higher id fail construction); `cache_capacity` is the display-entry
/// count past which the draw cache is flushed in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitmapFontConfig {
    /// Highest glyph id a descriptor may declare
    pub max_glyph_id: u16,
    /// Cached display entries allowed before the cache is flushed
    pub cache_capacity: usize,
}

impl Default for BitmapFontConfig {
    fn default() -> Self {
        Self {
            max_glyph_id: DEFAULT_MAX_GLYPH_ID,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl BitmapFontConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to TOML text
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Validate field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid(
                "cache_capacity must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
