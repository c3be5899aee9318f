// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Layer Cycle
//!
//! One discrete time step of a layer:
//! 1. Every unit computes its net input
//! 2. The layer inhibition is computed from the whole population
//! 3. Every unit settles one step with the shared inhibitory conductance
//! 4. The average activity is recomputed from the settled activities
//!
//! Each phase completes for all units before the next begins: phase 2 and
//! phase 4 read population snapshots.

use leabra_neural::{mean, LeabraError, Result, Unit};
use tracing::{trace, warn};

use crate::layer::Layer;
use crate::spec::LayerSpec;

/// Advance `layer` one time step under `spec`.
///
/// # Errors
///
/// `LeabraError::EmptyPopulation` if the layer has no units. The layer is not
/// modified in that case.
pub fn cycle_layer<U: Unit>(spec: &LayerSpec, layer: &mut Layer<U>) -> Result<()> {
    if layer.units.is_empty() {
        return Err(LeabraError::EmptyPopulation);
    }

    // Phase 1: net input
    for unit in &mut layer.units {
        unit.compute_net_input();
    }

    // Phase 2: inhibition from the previous cycle's average activity
    let mean_g_e = mean(&layer.excitatory_conductances())?;
    let gc_i = spec.inhibition(&mut layer.inhibition, mean_g_e, layer.average_activity);
    if !gc_i.is_finite() {
        warn!(
            layer = layer.label(),
            mean_g_e,
            gc_i,
            "non-finite inhibitory conductance"
        );
    }

    // Phase 3: settle units
    for unit in &mut layer.units {
        unit.cycle(gc_i);
    }

    // Phase 4: statistics
    layer.average_activity = mean(&layer.activities()?)?;
    layer.cycle_count += 1;

    trace!(
        layer = layer.label(),
        cycle = layer.cycle_count,
        mean_g_e,
        ffi = layer.inhibition.ffi,
        fbi = layer.inhibition.fbi,
        gc_i,
        average_activity = layer.average_activity,
        "layer cycled"
    );

    Ok(())
}

/// Cycle several independent layers, each with its own spec.
///
/// Layers own their units exclusively, so with the `parallel` feature they are
/// cycled concurrently. Returns the first error encountered.
#[cfg(feature = "parallel")]
pub fn cycle_layers<U: Unit + Send>(layers: &mut [Layer<U>]) -> Result<()> {
    use rayon::prelude::*;

    layers.par_iter_mut().try_for_each(Layer::cycle)
}

/// Cycle several independent layers, each with its own spec.
///
/// Built without the `parallel` feature: layers are cycled in order and the
/// first error stops the remaining layers.
#[cfg(not(feature = "parallel"))]
pub fn cycle_layers<U: Unit>(layers: &mut [Layer<U>]) -> Result<()> {
    layers.iter_mut().try_for_each(Layer::cycle)
}
