// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines the configuration structs that map to sections in
//! `leabra_configuration.toml`.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::options::{OptionValue, SpecOption};
use crate::{ConfigError, ConfigResult};

/// Root configuration structure
///
/// Unknown sections are rejected, so a misspelled table name fails to parse
/// instead of silently falling back to defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeabraConfig {
    pub logging: LoggingConfig,
    /// Base layer spec shared by every named spec
    pub layer_spec: LayerSpecConfig,
    /// Named specs, each a set of overrides applied on top of `layer_spec`
    pub layer_specs: BTreeMap<String, BTreeMap<String, OptionValue>>,
}

impl LeabraConfig {
    /// Resolve a named layer spec: the base `layer_spec` with the named
    /// overrides applied.
    ///
    /// # Errors
    ///
    /// `ConfigError::UnknownSpec` if no spec with that name exists, or any
    /// error produced while applying its overrides.
    pub fn layer_spec(&self, name: &str) -> ConfigResult<LayerSpecConfig> {
        let overrides = self
            .layer_specs
            .get(name)
            .ok_or_else(|| ConfigError::UnknownSpec(name.to_string()))?;
        self.layer_spec
            .with_options(overrides.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    /// Names of every named layer spec, in sorted order
    pub fn layer_spec_names(&self) -> impl Iterator<Item = &str> {
        self.layer_specs.keys().map(String::as_str)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level when no per-crate debug flag applies (trace, debug, info, warn, error)
    pub level: String,
    /// Output format: "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Parameters of the layer inhibition policy.
///
/// Field names are the recognized option names. The short names used by the
/// classic Leabra code are accepted as aliases when parsing TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayerSpecConfig {
    /// Activate layer inhibition
    #[serde(alias = "lay_inhib")]
    pub inhibition_enabled: bool,

    /// Integration constant for feedback inhibition
    #[serde(alias = "fb_dt")]
    pub feedback_time_constant: f32,

    /// Feedback scaling of inhibition
    #[serde(alias = "fb")]
    pub feedback_scale: f32,

    /// Feedforward scaling of inhibition
    #[serde(alias = "ff")]
    pub feedforward_scale: f32,

    /// Inhibition multiplier
    #[serde(alias = "g_i")]
    pub inhibition_gain: f32,

    /// Mean excitatory conductance below which feedforward inhibition is zero
    #[serde(alias = "ff0")]
    pub feedforward_threshold: f32,

    /// Target for adapting inhibition, and initial estimate of the effective average activity
    #[serde(alias = "avg_act_targ_init")]
    pub target_average_activity: f32,

    /// Effective average activity = adjust factor * average activity
    #[serde(alias = "avg_act_adjust")]
    pub average_activity_adjust_factor: f32,

    /// Keep the effective average activity constant at its target value
    #[serde(alias = "avg_act_fixed")]
    pub average_activity_fixed: bool,

    /// Override the target value with the first estimate
    #[serde(alias = "avg_act_use_first")]
    pub average_activity_use_first_estimate: bool,

    /// Time constant for integrating the average activity
    #[serde(
        alias = "avg_act_tau",
        deserialize_with = "deserialize_time_constant",
        skip_serializing_if = "Option::is_none"
    )]
    pub average_activity_time_constant: Option<f32>,
}

/// Same rules as a named override: a number, or `false` for unset
fn deserialize_time_constant<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    OptionValue::deserialize(deserializer)?
        .as_optional_real(SpecOption::AverageActivityTimeConstant)
        .map_err(de::Error::custom)
}

impl Default for LayerSpecConfig {
    fn default() -> Self {
        Self {
            inhibition_enabled: true,
            feedback_time_constant: 1.0 / 1.4,
            feedback_scale: 1.0,
            feedforward_scale: 1.0,
            inhibition_gain: 1.8,
            feedforward_threshold: 0.1,
            target_average_activity: 0.2,
            average_activity_adjust_factor: 1.0,
            average_activity_fixed: false,
            average_activity_use_first_estimate: false,
            average_activity_time_constant: None,
        }
    }
}

impl LayerSpecConfig {
    /// Build a spec from the defaults overridden by named options.
    ///
    /// # Errors
    ///
    /// - `ConfigError::UnknownOption` for a name that is not a recognized option
    /// - `ConfigError::InvalidValue` for a value of the wrong type
    /// - `ConfigError::ValidationError` if the resulting spec is out of range
    pub fn from_options<'a, I>(options: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (&'a str, OptionValue)>,
    {
        Self::default().with_options(options)
    }

    /// Copy of `self` with named options applied, validated.
    pub fn with_options<'a, I>(&self, options: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (&'a str, OptionValue)>,
    {
        let mut config = self.clone();
        for (name, value) in options {
            let option: SpecOption = name.parse()?;
            config.set(option, value)?;
        }
        crate::validation::validate_layer_spec(&config)?;
        Ok(config)
    }

    /// Set a single option. Does not validate ranges.
    pub fn set(&mut self, option: SpecOption, value: OptionValue) -> ConfigResult<()> {
        match option {
            SpecOption::InhibitionEnabled => self.inhibition_enabled = value.as_bool(option)?,
            SpecOption::FeedbackTimeConstant => {
                self.feedback_time_constant = value.as_real(option)?
            }
            SpecOption::FeedbackScale => self.feedback_scale = value.as_real(option)?,
            SpecOption::FeedforwardScale => self.feedforward_scale = value.as_real(option)?,
            SpecOption::InhibitionGain => self.inhibition_gain = value.as_real(option)?,
            SpecOption::FeedforwardThreshold => self.feedforward_threshold = value.as_real(option)?,
            SpecOption::TargetAverageActivity => {
                self.target_average_activity = value.as_real(option)?
            }
            SpecOption::AverageActivityAdjustFactor => {
                self.average_activity_adjust_factor = value.as_real(option)?
            }
            SpecOption::AverageActivityFixed => {
                self.average_activity_fixed = value.as_bool(option)?
            }
            SpecOption::AverageActivityUseFirstEstimate => {
                self.average_activity_use_first_estimate = value.as_bool(option)?
            }
            SpecOption::AverageActivityTimeConstant => {
                self.average_activity_time_constant = value.as_optional_real(option)?
            }
        }
        Ok(())
    }

    /// Current value of a single option
    pub fn get(&self, option: SpecOption) -> OptionValue {
        match option {
            SpecOption::InhibitionEnabled => OptionValue::Bool(self.inhibition_enabled),
            SpecOption::FeedbackTimeConstant => OptionValue::Real(self.feedback_time_constant),
            SpecOption::FeedbackScale => OptionValue::Real(self.feedback_scale),
            SpecOption::FeedforwardScale => OptionValue::Real(self.feedforward_scale),
            SpecOption::InhibitionGain => OptionValue::Real(self.inhibition_gain),
            SpecOption::FeedforwardThreshold => OptionValue::Real(self.feedforward_threshold),
            SpecOption::TargetAverageActivity => OptionValue::Real(self.target_average_activity),
            SpecOption::AverageActivityAdjustFactor => {
                OptionValue::Real(self.average_activity_adjust_factor)
            }
            SpecOption::AverageActivityFixed => OptionValue::Bool(self.average_activity_fixed),
            SpecOption::AverageActivityUseFirstEstimate => {
                OptionValue::Bool(self.average_activity_use_first_estimate)
            }
            SpecOption::AverageActivityTimeConstant => self
                .average_activity_time_constant
                .map_or(OptionValue::None, OptionValue::Real),
        }
    }
}
