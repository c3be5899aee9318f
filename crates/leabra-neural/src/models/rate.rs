// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Rate-Coded Point Neuron
//!
//! A conductance-based point neuron with a thresholded XX1 rate output.
//!
//! ## Model Dynamics
//!
//! ```text
//! Net input (once per cycle):
//!     g_e += net_dt × (net_raw − g_e)
//!     net_raw = 0
//!
//! Membrane potential:
//!     I_net = g_e·ḡ_e·(E_e − v_m) + ḡ_l·(E_l − v_m) + g_i·ḡ_i·(E_i − v_m)
//!     v_m  += vm_dt × I_net,   clamped to [vm_min, vm_max]
//!
//! Activity (XX1):
//!     x    = gain × max(0, v_m − θ)
//!     act += act_dt × (x / (x + 1) − act)
//! ```
//!
//! Input units ignore the dynamics: their activity is whatever was last
//! forced onto them.

use super::traits::{ModelParameters, Unit};
use crate::types::{LeabraError, Result, UnitKind};

/// Rate-coded point neuron
#[derive(Debug, Clone)]
pub struct RateUnit {
    params: RateUnitParameters,
    kind: UnitKind,
    /// Raw excitatory input accumulated since the last net input computation
    net_raw: f32,
    /// Excitatory conductance
    g_e: f32,
    /// Membrane potential
    v_m: f32,
    /// Activity
    act: f32,
}

impl RateUnit {
    /// Create a unit with validated parameters
    pub fn new(params: RateUnitParameters, kind: UnitKind) -> Result<Self> {
        params.validate()?;
        Ok(Self::new_unchecked(params, kind))
    }

    fn new_unchecked(params: RateUnitParameters, kind: UnitKind) -> Self {
        Self {
            net_raw: 0.0,
            g_e: 0.0,
            v_m: params.v_m_init,
            act: 0.0,
            params,
            kind,
        }
    }

    /// Unit with default parameters
    pub fn with_kind(kind: UnitKind) -> Self {
        Self::new_unchecked(RateUnitParameters::default(), kind)
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn params(&self) -> &RateUnitParameters {
        &self.params
    }

    pub fn membrane_potential(&self) -> f32 {
        self.v_m
    }

    /// XX1 transfer function of a membrane potential
    #[inline]
    pub fn rate(&self, v_m: f32) -> f32 {
        let x = self.params.act_gain * (v_m - self.params.act_thr).max(0.0);
        x / (x + 1.0)
    }
}

impl Default for RateUnit {
    fn default() -> Self {
        Self::with_kind(UnitKind::Hidden)
    }
}

impl Unit for RateUnit {
    #[inline]
    fn activity(&self) -> f32 {
        self.act
    }

    #[inline]
    fn excitatory_conductance(&self) -> f32 {
        self.g_e
    }

    fn compute_net_input(&mut self) {
        self.g_e += self.params.net_dt * (self.net_raw - self.g_e);
        self.net_raw = 0.0;
    }

    fn cycle(&mut self, inhibitory_conductance: f32) {
        if self.kind == UnitKind::Input {
            return;
        }
        let p = &self.params;

        let i_net = self.g_e * p.g_bar_e * (p.e_rev_e - self.v_m)
            + p.g_bar_l * (p.e_rev_l - self.v_m)
            + inhibitory_conductance * p.g_bar_i * (p.e_rev_i - self.v_m);
        self.v_m = (self.v_m + p.vm_dt * i_net).clamp(p.vm_min, p.vm_max);

        let new_act = self.rate(self.v_m);
        self.act += self.params.act_dt * (new_act - self.act);
    }

    fn reset(&mut self) {
        self.net_raw = 0.0;
        self.g_e = 0.0;
        self.v_m = self.params.v_m_init;
        self.act = 0.0;
    }

    fn force_activity(&mut self, value: f32) {
        self.act = value;
    }

    fn add_excitatory(&mut self, value: f32) {
        self.net_raw += value;
    }
}

/// Rate unit parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct RateUnitParameters {
    /// Integration rate of the excitatory conductance
    pub net_dt: f32,
    /// Integration rate of the membrane potential
    pub vm_dt: f32,
    /// Integration rate of the activity (1.0 = no smoothing)
    pub act_dt: f32,

    pub g_bar_e: f32,
    pub g_bar_l: f32,
    pub g_bar_i: f32,

    pub e_rev_e: f32,
    pub e_rev_l: f32,
    pub e_rev_i: f32,

    /// Firing threshold of the XX1 function
    pub act_thr: f32,
    /// Gain of the XX1 function
    pub act_gain: f32,

    pub v_m_init: f32,
    pub vm_min: f32,
    pub vm_max: f32,
}

impl Default for RateUnitParameters {
    fn default() -> Self {
        Self {
            net_dt: 1.0 / 1.4,
            vm_dt: 1.0 / 3.3,
            act_dt: 1.0,
            g_bar_e: 1.0,
            g_bar_l: 0.1,
            g_bar_i: 1.0,
            e_rev_e: 1.0,
            e_rev_l: 0.3,
            e_rev_i: 0.25,
            act_thr: 0.5,
            act_gain: 100.0,
            v_m_init: 0.4,
            vm_min: 0.0,
            vm_max: 2.0,
        }
    }
}

impl ModelParameters for RateUnitParameters {
    fn validate(&self) -> Result<()> {
        let rates = [
            ("net_dt", self.net_dt),
            ("vm_dt", self.vm_dt),
            ("act_dt", self.act_dt),
        ];
        for (name, dt) in rates {
            if !(dt > 0.0 && dt <= 1.0) {
                return Err(LeabraError::InvalidParameter(format!(
                    "RateUnit: {} must be in (0, 1], got {}",
                    name, dt
                )));
            }
        }
        if self.g_bar_e < 0.0 || self.g_bar_l < 0.0 || self.g_bar_i < 0.0 {
            return Err(LeabraError::InvalidParameter(
                "RateUnit: maximal conductances must be non-negative".to_string(),
            ));
        }
        if self.act_gain <= 0.0 {
            return Err(LeabraError::InvalidParameter(
                "RateUnit: act_gain must be positive".to_string(),
            ));
        }
        if !(self.vm_min <= self.v_m_init && self.v_m_init <= self.vm_max) {
            return Err(LeabraError::InvalidParameter(
                "RateUnit: v_m_init must lie in [vm_min, vm_max]".to_string(),
            ));
        }
        Ok(())
    }
}
