//! Configuration for the sharing codec.
//!
//! Limits default to the deployed service's values; a site operator can
//! tighten them from the same TOML file that configures the rest of the
//! tracker.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration parse failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The TOML could not be parsed.
    #[error("failed to parse share config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field failed validation.
    #[error("invalid share config: {0}")]
    Validation(String),
}

/// Bounds applied by the decoder before trusting any payload content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    /// Maximum `favs` parameter length before decompression is attempted.
    #[serde(default = "default_max_payload_chars")]
    pub max_payload_chars: usize,

    /// Maximum decompressed text length (decompression-bomb guard).
    #[serde(default = "default_max_decompressed_chars")]
    pub max_decompressed_chars: usize,

    /// Maximum number of film keys in one share.
    #[serde(default = "default_max_films")]
    pub max_films: usize,
}

const fn default_max_payload_chars() -> usize {
    100_000
}

const fn default_max_decompressed_chars() -> usize {
    500_000
}

const fn default_max_films() -> usize {
    10_000
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_payload_chars: default_max_payload_chars(),
            max_decompressed_chars: default_max_decompressed_chars(),
            max_films: default_max_films(),
        }
    }
}

/// Top-level sharing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Site origin used when assembling share URLs.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Decoder bounds.
    #[serde(default)]
    pub limits: DecodeLimits,
}

fn default_origin() -> String {
    "https://reelkeeper.example".to_string()
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            limits: DecodeLimits::default(),
        }
    }
}

impl ShareConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        if config.origin.trim().is_empty() {
            return Err(ConfigError::Validation("origin must not be blank".into()));
        }
        if config.limits.max_payload_chars == 0
            || config.limits.max_decompressed_chars == 0
            || config.limits.max_films == 0
        {
            return Err(ConfigError::Validation("limits must be positive".into()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_limits() {
        let limits = DecodeLimits::default();
        assert_eq!(limits.max_payload_chars, 100_000);
        assert_eq!(limits.max_decompressed_chars, 500_000);
        assert_eq!(limits.max_films, 10_000);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ShareConfig::from_toml("").unwrap();
        assert_eq!(config, ShareConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = ShareConfig::from_toml(
            r#"
            origin = "https://films.example"

            [limits]
            max_films = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.origin, "https://films.example");
        assert_eq!(config.limits.max_films, 500);
        assert_eq!(config.limits.max_payload_chars, 100_000);
    }

    #[test]
    fn rejects_blank_origin() {
        let err = ShareConfig::from_toml(r#"origin = "  ""#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_zero_limits() {
        let err = ShareConfig::from_toml("[limits]\nmax_films = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
