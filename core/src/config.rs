//! Solver tuning parameters.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Upper bound on propagation rounds.
    ///
    /// A round can only use values made available by the previous one, and
    /// three rule families are enough to propagate every solvable
    /// configuration from the supported inputs, so the default is 3.
    pub max_rounds: usize,
    /// Known values closer than this are considered unchanged between rounds
    pub settle_epsilon: f64,
    /// How far an arcsine argument may overshoot 1 before the law of sines
    /// rejects it instead of clamping
    pub domain_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            settle_epsilon: 1e-9,
            domain_tolerance: 1e-9,
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::Invalid("max_rounds must be at least 1".into()));
        }
        for (name, value) in [
            ("settle_epsilon", self.settle_epsilon),
            ("domain_tolerance", self.domain_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
