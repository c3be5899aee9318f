// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Layer
//!
//! A fixed-size population of units sharing one inhibitory conductance.
//! The layer owns its units; the spec is shared and read-only.

use std::sync::Arc;

use leabra_neural::{
    ensure_shape, mean, ConnectionId, LeabraError, RateUnit, RateUnitParameters, Result, Unit,
    UnitKind,
};
use tracing::debug;

use crate::inhibition::InhibitionState;
use crate::report::LayerReport;
use crate::spec::LayerSpec;

/// Leabra layer
#[derive(Debug, Clone)]
pub struct Layer<U> {
    pub(crate) name: Option<String>,
    pub(crate) kind: UnitKind,
    pub(crate) spec: Arc<LayerSpec>,
    pub(crate) units: Vec<U>,

    pub(crate) inhibition: InhibitionState,

    /// Mean unit activity, recomputed after every cycle
    pub(crate) average_activity: f32,
    /// Effective average activity, starts at the spec target
    pub(crate) average_activity_effective: f32,
    pub(crate) cycle_count: u64,

    incoming_connections: Vec<ConnectionId>,
    outgoing_connections: Vec<ConnectionId>,
}

impl<U: Unit> Layer<U> {
    /// Build a layer around an existing set of units
    pub fn with_units(units: Vec<U>, spec: Arc<LayerSpec>, kind: UnitKind) -> Self {
        let average_activity_effective = spec.target_average_activity();
        Self {
            name: None,
            kind,
            spec,
            units,
            inhibition: InhibitionState::default(),
            average_activity: 0.0,
            average_activity_effective,
            cycle_count: 0,
            incoming_connections: Vec::new(),
            outgoing_connections: Vec::new(),
        }
    }

    /// Build a layer of `size` units produced by `make_unit(index)`
    pub fn from_fn<F>(size: usize, spec: Arc<LayerSpec>, kind: UnitKind, make_unit: F) -> Self
    where
        F: FnMut(usize) -> U,
    {
        Self::with_units((0..size).map(make_unit).collect(), spec, kind)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.units.len()
    }

    pub fn spec(&self) -> &Arc<LayerSpec> {
        &self.spec
    }

    pub fn units(&self) -> &[U] {
        &self.units
    }

    /// Reset all the units in the layer.
    ///
    /// Inhibition and average activity are left as they are.
    pub fn reset(&mut self) {
        for unit in &mut self.units {
            unit.reset();
        }
        debug!(layer = self.label(), units = self.units.len(), "layer units reset");
    }

    /// Activity of every unit, in unit order
    ///
    /// # Errors
    ///
    /// `LeabraError::EmptyPopulation` for a layer with no units.
    pub fn activities(&self) -> Result<Vec<f32>> {
        if self.units.is_empty() {
            return Err(LeabraError::EmptyPopulation);
        }
        Ok(self.units.iter().map(Unit::activity).collect())
    }

    /// Excitatory conductance of every unit, in unit order
    pub fn excitatory_conductances(&self) -> Vec<f32> {
        self.units.iter().map(Unit::excitatory_conductance).collect()
    }

    /// Set the units' activities equal to `values`, bypassing their dynamics
    ///
    /// # Errors
    ///
    /// `LeabraError::ShapeMismatch` unless there is exactly one value per unit.
    /// No unit is modified on error.
    pub fn force_activity(&mut self, values: &[f32]) -> Result<()> {
        ensure_shape(self.units.len(), values.len())?;
        for (unit, &value) in self.units.iter_mut().zip(values) {
            unit.force_activity(value);
        }
        Ok(())
    }

    /// Add excitatory inputs to the layer's units
    ///
    /// # Errors
    ///
    /// `LeabraError::ShapeMismatch` unless there is exactly one value per unit.
    /// No unit is modified on error.
    pub fn add_excitatory(&mut self, values: &[f32]) -> Result<()> {
        ensure_shape(self.units.len(), values.len())?;
        for (unit, &value) in self.units.iter_mut().zip(values) {
            unit.add_excitatory(value);
        }
        Ok(())
    }

    /// Advance the layer one time step using its own spec
    pub fn cycle(&mut self) -> Result<()> {
        let spec = Arc::clone(&self.spec);
        spec.cycle(self)
    }

    /// Mean of the current unit activities
    pub fn mean_activity(&self) -> Result<f32> {
        mean(&self.activities()?)
    }

    pub fn inhibition(&self) -> InhibitionState {
        self.inhibition
    }

    pub fn inhibitory_conductance(&self) -> f32 {
        self.inhibition.gc_i
    }

    pub fn feedforward_inhibition(&self) -> f32 {
        self.inhibition.ffi
    }

    pub fn feedback_inhibition(&self) -> f32 {
        self.inhibition.fbi
    }

    pub fn average_activity(&self) -> f32 {
        self.average_activity
    }

    pub fn average_activity_effective(&self) -> f32 {
        self.average_activity_effective
    }

    /// Number of completed cycles
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn add_incoming_connection(&mut self, connection: ConnectionId) {
        self.incoming_connections.push(connection);
    }

    pub fn add_outgoing_connection(&mut self, connection: ConnectionId) {
        self.outgoing_connections.push(connection);
    }

    pub fn incoming_connections(&self) -> &[ConnectionId] {
        &self.incoming_connections
    }

    pub fn outgoing_connections(&self) -> &[ConnectionId] {
        &self.outgoing_connections
    }

    /// Snapshot of the inhibition parameters and state
    pub fn report(&self) -> LayerReport {
        LayerReport::from_layer(self)
    }

    pub(crate) fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl Layer<RateUnit> {
    /// Layer of `size` rate units sharing the same parameters
    ///
    /// # Errors
    ///
    /// `LeabraError::InvalidParameter` if `params` fail validation.
    pub fn with_rate_units(
        size: usize,
        spec: Arc<LayerSpec>,
        params: RateUnitParameters,
        kind: UnitKind,
    ) -> Result<Self> {
        let prototype = RateUnit::new(params, kind)?;
        Ok(Self::with_units(vec![prototype; size], spec, kind))
    }
}
