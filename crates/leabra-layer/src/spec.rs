// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Layer spec: a validated, immutable inhibition policy
//!
//! One spec is typically shared by many layers through an `Arc`. Nothing in
//! the cycle algorithm mutates it.

use std::sync::Arc;

use leabra_config::{validate_layer_spec, ConfigResult, LayerSpecConfig, OptionValue};
use leabra_neural::{Result, Unit};
use tracing::debug;

use crate::cycle::cycle_layer;
use crate::inhibition::InhibitionState;
use crate::layer::Layer;

/// Validated layer parameters plus the layer cycle algorithm
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerSpec {
    config: LayerSpecConfig,
}

impl LayerSpec {
    /// Wrap a configuration after validating it
    pub fn new(config: LayerSpecConfig) -> ConfigResult<Self> {
        validate_layer_spec(&config)?;
        debug!(?config, "layer spec constructed");
        Ok(Self { config })
    }

    /// Build from the defaults overridden by named options
    ///
    /// # Errors
    ///
    /// `ConfigError::UnknownOption` for any unrecognized option name.
    pub fn from_options<'a, I>(options: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (&'a str, OptionValue)>,
    {
        Self::new(LayerSpecConfig::from_options(options)?)
    }

    /// Convenience for sharing one spec across layers
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn config(&self) -> &LayerSpecConfig {
        &self.config
    }

    pub fn inhibition_enabled(&self) -> bool {
        self.config.inhibition_enabled
    }

    pub fn target_average_activity(&self) -> f32 {
        self.config.target_average_activity
    }

    /// Compute this cycle's inhibition from the mean excitatory conductance and
    /// the previous average activity, storing every component in `state`.
    pub fn inhibition(
        &self,
        state: &mut InhibitionState,
        mean_excitatory_conductance: f32,
        average_activity: f32,
    ) -> f32 {
        state.step(&self.config, mean_excitatory_conductance, average_activity)
    }

    /// Cycle a layer, and all the units in it
    pub fn cycle<U: Unit>(&self, layer: &mut Layer<U>) -> Result<()> {
        cycle_layer(self, layer)
    }
}

impl TryFrom<LayerSpecConfig> for LayerSpec {
    type Error = leabra_config::ConfigError;

    fn try_from(config: LayerSpecConfig) -> ConfigResult<Self> {
        Self::new(config)
    }
}
