//! Generation loop configuration

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings for [`crate::features::generation::TestGenerator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Base SMT timeout in seconds (1..=600)
    pub smt_timeout_secs: u64,

    /// Multiplier applied to the base timeout to absorb solver warm-up (1..=16)
    pub timeout_multiplier: u32,

    /// Maximum oracle candidates tried per `generate_test` call (None = until exhausted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_candidates: Option<usize>,
}

fn default_smt_timeout() -> u64 {
    3
}
fn default_timeout_multiplier() -> u32 {
    4
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            smt_timeout_secs: default_smt_timeout(),
            timeout_multiplier: default_timeout_multiplier(),
            max_candidates: None,
        }
    }
}

impl GenerationConfig {
    pub fn smt_timeout_secs(mut self, secs: u64) -> Self {
        self.smt_timeout_secs = secs;
        self
    }

    pub fn timeout_multiplier(mut self, multiplier: u32) -> Self {
        self.timeout_multiplier = multiplier;
        self
    }

    pub fn max_candidates(mut self, limit: usize) -> Self {
        self.max_candidates = Some(limit);
        self
    }

    /// Effective bound on one solver call
    pub fn solver_timeout(&self) -> Duration {
        Duration::from_secs(self.smt_timeout_secs) * self.timeout_multiplier
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Validatable for GenerationConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.smt_timeout_secs == 0 || self.smt_timeout_secs > 600 {
            return Err(ConfigError::range_with_hint(
                "smt_timeout_secs",
                self.smt_timeout_secs,
                1,
                600,
                "Solver calls must be bounded by a positive timeout",
            ));
        }

        if self.timeout_multiplier == 0 || self.timeout_multiplier > 16 {
            return Err(ConfigError::range_with_hint(
                "timeout_multiplier",
                self.timeout_multiplier,
                1,
                16,
                "Multiplier scales the base timeout for solver warm-up",
            ));
        }

        if self.max_candidates == Some(0) {
            return Err(ConfigError::Validation(
                "max_candidates must be at least 1 when set".to_string(),
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "GenerationConfig"
    }
}
