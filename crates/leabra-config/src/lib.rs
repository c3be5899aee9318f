// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Leabra Configuration System
//!
//! Type-safe configuration for leabra layers with support for:
//! - Named option overrides on top of base defaults
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust
//! use leabra_config::{LayerSpecConfig, OptionValue};
//!
//! let config = LayerSpecConfig::from_options([
//!     ("inhibition_gain", OptionValue::Real(2.0)),
//!     ("feedforward_threshold", OptionValue::Real(0.05)),
//! ])
//! .expect("valid options");
//! assert_eq!(config.inhibition_gain, 2.0);
//!
//! // Unknown option names fail fast
//! assert!(LayerSpecConfig::from_options([("foo", OptionValue::Real(1.0))]).is_err());
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod options;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use options::{OptionValue, SpecOption};
pub use types::*;
pub use validation::{validate_config, validate_layer_spec, ConfigValidationError};

/// Re-export for convenience
pub use serde;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Unknown layer spec option: '{0}'")]
    UnknownOption(String),

    #[error("Unknown layer spec name: '{0}'")]
    UnknownSpec(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
