//! Engine configuration
//!
//! Loaded once from an optional JSON file; every field has a default.

use crate::engine::buffer::DEFAULT_SAMPLE_RATE;
use crate::error::{MoodwaveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Longest clip `generate` will render
pub const DEFAULT_MAX_DURATION_SECS: f64 = 30.0;

/// Process-wide engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sample rate for synthesis and retargeted remixes
    pub sample_rate: u32,
    /// Generated clips longer than this are shortened to it
    pub max_duration_secs: f64,
    pub default_mood: String,
    pub default_genre: String,
    pub default_duration_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            default_mood: "happy".to_string(),
            default_genre: "electronic".to_string(),
            default_duration_secs: 10.0,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MoodwaveError::ConfigError {
            details: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(MoodwaveError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if !(self.max_duration_secs > 0.0) {
            return Err(MoodwaveError::ConfigError {
                details: format!(
                    "max_duration_secs must be positive, got {}",
                    self.max_duration_secs
                ),
            });
        }
        if !(self.default_duration_secs > 0.0) {
            return Err(MoodwaveError::ConfigError {
                details: format!(
                    "default_duration_secs must be positive, got {}",
                    self.default_duration_secs
                ),
            });
        }
        Ok(())
    }
}
