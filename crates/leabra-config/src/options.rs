// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Recognized layer spec option names and their values
//!
//! The set of option names is fixed: a name either parses into a
//! [`SpecOption`] or construction fails with `ConfigError::UnknownOption`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Every recognized layer spec option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecOption {
    InhibitionEnabled,
    FeedbackTimeConstant,
    FeedbackScale,
    FeedforwardScale,
    InhibitionGain,
    FeedforwardThreshold,
    TargetAverageActivity,
    AverageActivityAdjustFactor,
    AverageActivityFixed,
    AverageActivityUseFirstEstimate,
    AverageActivityTimeConstant,
}

impl SpecOption {
    pub const ALL: [SpecOption; 11] = [
        SpecOption::InhibitionEnabled,
        SpecOption::FeedbackTimeConstant,
        SpecOption::FeedbackScale,
        SpecOption::FeedforwardScale,
        SpecOption::InhibitionGain,
        SpecOption::FeedforwardThreshold,
        SpecOption::TargetAverageActivity,
        SpecOption::AverageActivityAdjustFactor,
        SpecOption::AverageActivityFixed,
        SpecOption::AverageActivityUseFirstEstimate,
        SpecOption::AverageActivityTimeConstant,
    ];

    /// Canonical option name
    pub const fn name(self) -> &'static str {
        match self {
            SpecOption::InhibitionEnabled => "inhibition_enabled",
            SpecOption::FeedbackTimeConstant => "feedback_time_constant",
            SpecOption::FeedbackScale => "feedback_scale",
            SpecOption::FeedforwardScale => "feedforward_scale",
            SpecOption::InhibitionGain => "inhibition_gain",
            SpecOption::FeedforwardThreshold => "feedforward_threshold",
            SpecOption::TargetAverageActivity => "target_average_activity",
            SpecOption::AverageActivityAdjustFactor => "average_activity_adjust_factor",
            SpecOption::AverageActivityFixed => "average_activity_fixed",
            SpecOption::AverageActivityUseFirstEstimate => "average_activity_use_first_estimate",
            SpecOption::AverageActivityTimeConstant => "average_activity_time_constant",
        }
    }

    /// Short name used by the classic Leabra code
    pub const fn alias(self) -> &'static str {
        match self {
            SpecOption::InhibitionEnabled => "lay_inhib",
            SpecOption::FeedbackTimeConstant => "fb_dt",
            SpecOption::FeedbackScale => "fb",
            SpecOption::FeedforwardScale => "ff",
            SpecOption::InhibitionGain => "g_i",
            SpecOption::FeedforwardThreshold => "ff0",
            SpecOption::TargetAverageActivity => "avg_act_targ_init",
            SpecOption::AverageActivityAdjustFactor => "avg_act_adjust",
            SpecOption::AverageActivityFixed => "avg_act_fixed",
            SpecOption::AverageActivityUseFirstEstimate => "avg_act_use_first",
            SpecOption::AverageActivityTimeConstant => "avg_act_tau",
        }
    }
}

impl FromStr for SpecOption {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpecOption::ALL
            .into_iter()
            .find(|option| option.name() == s || option.alias() == s)
            .ok_or_else(|| ConfigError::UnknownOption(s.to_string()))
    }
}

impl fmt::Display for SpecOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value given to a layer spec option
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Real(f32),
    /// Unset optional value
    None,
}

impl OptionValue {
    pub(crate) fn as_bool(self, option: SpecOption) -> Result<bool, ConfigError> {
        match self {
            OptionValue::Bool(b) => Ok(b),
            other => Err(type_error(option, "a boolean", other)),
        }
    }

    pub(crate) fn as_real(self, option: SpecOption) -> Result<f32, ConfigError> {
        match self {
            OptionValue::Real(r) => Ok(r),
            other => Err(type_error(option, "a real number", other)),
        }
    }

    /// `false` is accepted as "unset", matching the classic default of `avg_act_tau`.
    pub(crate) fn as_optional_real(self, option: SpecOption) -> Result<Option<f32>, ConfigError> {
        match self {
            OptionValue::Real(r) => Ok(Some(r)),
            OptionValue::None | OptionValue::Bool(false) => Ok(None),
            other => Err(type_error(option, "a real number or none", other)),
        }
    }

    /// Parse a value from its textual form (`true`, `false`, `none`, or a number)
    pub fn parse_str(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "true" | "yes" => return Ok(OptionValue::Bool(true)),
            "false" | "no" => return Ok(OptionValue::Bool(false)),
            "none" => return Ok(OptionValue::None),
            _ => {}
        }
        s.parse::<f32>()
            .map(OptionValue::Real)
            .map_err(|_| {
                ConfigError::InvalidValue(format!("cannot parse '{}' as an option value", s))
            })
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Real(r) => write!(f, "{}", r),
            OptionValue::None => f.write_str("none"),
        }
    }
}

fn type_error(option: SpecOption, expected: &str, got: OptionValue) -> ConfigError {
    ConfigError::InvalidValue(format!("{} expects {}, got {}", option, expected, got))
}
