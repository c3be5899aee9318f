// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Layer diagnostics: constants and state variables at a point in time

use core::fmt;

use leabra_neural::{Unit, UnitKind};
use serde::Serialize;

use crate::layer::Layer;

/// Snapshot of a layer's inhibition parameters and state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerReport {
    pub name: Option<String>,
    pub kind: UnitKind,
    pub size: usize,
    pub cycle: u64,
    pub parameters: ReportParameters,
    pub state: ReportState,
}

/// Inhibition constants, under their short names
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportParameters {
    pub fb_dt: f32,
    pub ff0: f32,
    pub ff: f32,
    pub fb: f32,
    pub g_i: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportState {
    pub gc_i: f32,
    pub fbi: f32,
    pub ffi: f32,
    pub avg_act: f32,
    pub avg_act_p_eff: f32,
}

impl LayerReport {
    pub fn from_layer<U: Unit>(layer: &Layer<U>) -> Self {
        let config = layer.spec().config();
        Self {
            name: layer.name().map(str::to_string),
            kind: layer.kind(),
            size: layer.size(),
            cycle: layer.cycle_count(),
            parameters: ReportParameters {
                fb_dt: config.feedback_time_constant,
                ff0: config.feedforward_threshold,
                ff: config.feedforward_scale,
                fb: config.feedback_scale,
                g_i: config.inhibition_gain,
            },
            state: ReportState {
                gc_i: layer.inhibitory_conductance(),
                fbi: layer.feedback_inhibition(),
                ffi: layer.feedforward_inhibition(),
                avg_act: layer.average_activity(),
                avg_act_p_eff: layer.average_activity_effective(),
            },
        }
    }
}

impl fmt::Display for LayerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parameters;
        writeln!(f, "Parameters:")?;
        let parameters = [
            ("fb_dt", p.fb_dt),
            ("ff0", p.ff0),
            ("ff", p.ff),
            ("fb", p.fb),
            ("g_i", p.g_i),
        ];
        for (name, value) in parameters {
            writeln!(f, "   {}: {:.2}", name, value)?;
        }

        let s = &self.state;
        writeln!(f, "State:")?;
        for (name, value) in [("gc_i", s.gc_i), ("fbi", s.fbi), ("ffi", s.ffi)] {
            writeln!(f, "   {}: {:.2}", name, value)?;
        }
        Ok(())
    }
}
