// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Unit Interface
//!
//! The boundary between a layer and the units it owns. A layer only ever
//! talks to its units through this trait, so any rate or spiking unit model
//! can be driven by the layer inhibition algorithm.

use crate::types::Result;

/// One computational element owned by a layer
///
/// Call order within one layer cycle is fixed: `compute_net_input` on every
/// unit, then `cycle` on every unit with the shared inhibitory conductance.
pub trait Unit {
    /// Current activity, in [0, 1] by convention
    fn activity(&self) -> f32;

    /// Excitatory conductance after the latest `compute_net_input`
    fn excitatory_conductance(&self) -> f32;

    /// Consume the accumulated raw excitatory input into the excitatory conductance
    fn compute_net_input(&mut self);

    /// Advance one step given the inhibitory conductance broadcast by the layer
    fn cycle(&mut self, inhibitory_conductance: f32);

    /// Return to the initial state
    fn reset(&mut self);

    /// Overwrite the activity, bypassing the unit dynamics
    fn force_activity(&mut self, value: f32);

    /// Add to the raw excitatory input accumulator
    fn add_excitatory(&mut self, value: f32);
}

/// Validation contract for unit model parameters
pub trait ModelParameters {
    /// Check that every parameter is within its valid range
    fn validate(&self) -> Result<()>;
}
