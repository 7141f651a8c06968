//! Configuration for the generation loop
//!
//! Loaded from YAML or built in code, validated before use.

pub mod error;
pub mod generation_config;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use generation_config::GenerationConfig;
pub use validation::Validatable;
