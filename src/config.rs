//! Construction time parameters of the watermark.
//!
//! The embedder and the extractor must use the same values for everything except
//! `max_dimension`, a mismatch does not produce an error but silently decodes the wrong text.

use crate::error::{Error, Result};
use crate::haar::Subband;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration shared by embedding and decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Amount added to or subtracted from each selected carrier cell, in normalized luma units.
    pub strength: f32,
    /// Seed for the coefficient permutation.
    pub seed: u64,
    /// Subband that carries the watermark.
    pub carrier: Subband,
    /// Upper bound on the number of cells assigned to a single bit.
    pub max_group_size: usize,
    /// Largest accepted width or height when decoding image containers.
    pub max_dimension: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strength: 0.1,
            seed: 42,
            carrier: Subband::LH,
            max_group_size: 1000,
            max_dimension: 8192,
        }
    }
}

impl Config {
    /// Read a configuration from a JSON file, missing fields take their default.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the values can be used.
    pub fn validate(&self) -> Result<()> {
        if !self.strength.is_finite() || self.strength <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "strength must be a positive number, got {}",
                self.strength
            )));
        }
        if self.max_group_size == 0 {
            return Err(Error::InvalidConfig(
                "max_group_size must be at least one".to_owned(),
            ));
        }
        if self.max_dimension == 0 {
            return Err(Error::InvalidConfig(
                "max_dimension must be at least one".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.strength, 0.1);
        assert_eq!(config.seed, 42);
        assert_eq!(config.carrier, Subband::LH);
        assert_eq!(config.max_group_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(r#"{"seed": 7, "carrier": "HL"}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.carrier, Subband::HL);
        assert_eq!(config.strength, 0.1);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = Config {
            strength: 0.25,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_json(r#"{"strength": -1.0}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"max_group_size": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"max_dimension": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"carrier": "XY"}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/watermark.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
