// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Ensures layer spec values are finite and within the ranges the inhibition
//! dynamics are stable for, and that logging settings are recognized.

use crate::{ConfigError, ConfigResult, LayerSpecConfig, LeabraConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    OutOfRange { field: String, value: f32, range: &'static str },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { field, value, range } => {
                write!(f, "{} = {} is outside valid range {}", field, value, range)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration, including every named layer spec
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &LeabraConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_logging(config, &mut errors);
    collect_layer_spec_errors("layer_spec", &config.layer_spec, &mut errors);

    // Named specs are resolved so unknown override names surface here too
    for name in config.layer_spec_names() {
        match config.layer_spec(name) {
            Ok(_) => {}
            Err(ConfigError::ValidationError(msg)) => {
                errors.push(ConfigValidationError::InvalidValue {
                    field: format!("layer_specs.{}", name),
                    reason: msg,
                })
            }
            Err(other) => return Err(other),
        }
    }

    into_result(errors)
}

/// Validate a single layer spec
///
/// Checks:
/// - `feedback_time_constant` in (0, 1]
/// - scales, gain and threshold finite and non-negative
/// - `target_average_activity` in [0, 1]
/// - `average_activity_adjust_factor` > 0
/// - `average_activity_time_constant` > 0 when set
pub fn validate_layer_spec(spec: &LayerSpecConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();
    collect_layer_spec_errors("layer_spec", spec, &mut errors);
    into_result(errors)
}

fn into_result(errors: Vec<ConfigValidationError>) -> ConfigResult<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

fn collect_layer_spec_errors(
    prefix: &str,
    spec: &LayerSpecConfig,
    errors: &mut Vec<ConfigValidationError>,
) {
    let mut out_of_range = |field: &str, value: f32, range: &'static str| {
        errors.push(ConfigValidationError::OutOfRange {
            field: format!("{}.{}", prefix, field),
            value,
            range,
        });
    };

    let fb_dt = spec.feedback_time_constant;
    if !(fb_dt > 0.0 && fb_dt <= 1.0) {
        out_of_range("feedback_time_constant", fb_dt, "(0, 1]");
    }

    for (field, value) in [
        ("feedback_scale", spec.feedback_scale),
        ("feedforward_scale", spec.feedforward_scale),
        ("inhibition_gain", spec.inhibition_gain),
        ("feedforward_threshold", spec.feedforward_threshold),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            out_of_range(field, value, "[0, inf)");
        }
    }

    let target = spec.target_average_activity;
    if !(0.0..=1.0).contains(&target) {
        out_of_range("target_average_activity", target, "[0, 1]");
    }

    let adjust = spec.average_activity_adjust_factor;
    if !(adjust.is_finite() && adjust > 0.0) {
        out_of_range("average_activity_adjust_factor", adjust, "(0, inf)");
    }

    if let Some(tau) = spec.average_activity_time_constant {
        if !(tau.is_finite() && tau > 0.0) {
            out_of_range("average_activity_time_constant", tau, "(0, inf)");
        }
    }
}

fn validate_logging(config: &LeabraConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("unknown level '{}'", config.logging.level),
        });
    }

    let format = config.logging.format.to_lowercase();
    if format != "text" && format != "json" {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: format!("expected 'text' or 'json', got '{}'", config.logging.format),
        });
    }
}
