// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Layer Inhibition
//!
//! Feedforward/feedback approximation of inhibitory interneurons.
//!
//! ```text
//! ffi  = ff · max(0, mean(g_e) − ff0)          (no memory)
//! fbi += fb_dt · (fb · avg_act − fbi)          (leaky integrator)
//! gc_i = g_i · (ffi + fbi)
//! ```
//!
//! `avg_act` is the layer average activity of the *previous* cycle.

use leabra_config::LayerSpecConfig;
use serde::Serialize;

/// Inhibition values stored on a layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InhibitionState {
    /// Inhibitory conductance broadcast to every unit
    pub gc_i: f32,
    /// Feedforward component
    pub ffi: f32,
    /// Feedback component, persists across cycles
    pub fbi: f32,
}

impl InhibitionState {
    /// Advance the inhibition by one cycle and return the new `gc_i`.
    ///
    /// With inhibition disabled, `gc_i` is set to zero and `ffi`/`fbi` are left
    /// untouched.
    pub fn step(&mut self, spec: &LayerSpecConfig, mean_g_e: f32, average_activity: f32) -> f32 {
        if !spec.inhibition_enabled {
            self.gc_i = 0.0;
            return self.gc_i;
        }

        self.ffi = feedforward_inhibition(spec, mean_g_e);
        self.fbi = feedback_step(spec, self.fbi, average_activity);
        self.gc_i = spec.inhibition_gain * (self.ffi + self.fbi);
        self.gc_i
    }
}

/// Feedforward inhibition from the mean excitatory conductance
#[inline]
pub fn feedforward_inhibition(spec: &LayerSpecConfig, mean_g_e: f32) -> f32 {
    spec.feedforward_scale * (mean_g_e - spec.feedforward_threshold).max(0.0)
}

/// One step of the feedback integrator towards `fb · average_activity`
#[inline]
pub fn feedback_step(spec: &LayerSpecConfig, fbi: f32, average_activity: f32) -> f32 {
    fbi + spec.feedback_time_constant * (spec.feedback_scale * average_activity - fbi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedforward_clamped_below_threshold() {
        let spec = LayerSpecConfig::default();
        assert_eq!(feedforward_inhibition(&spec, 0.0), 0.0);
        assert_eq!(feedforward_inhibition(&spec, 0.1), 0.0);
        assert_eq!(feedforward_inhibition(&spec, 0.05), 0.0);
        assert!((feedforward_inhibition(&spec, 0.3) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_feedback_full_rate_jumps_to_target() {
        let spec = LayerSpecConfig {
            feedback_time_constant: 1.0,
            feedback_scale: 2.0,
            ..Default::default()
        };
        assert_eq!(feedback_step(&spec, 0.7, 0.25), 0.5);
    }

    #[test]
    fn test_step_stores_all_components() {
        let spec = LayerSpecConfig::default();
        let mut state = InhibitionState::default();

        let gc_i = state.step(&spec, 0.3, 0.5);

        let expected_fbi = (1.0 / 1.4) * 0.5;
        assert!((state.ffi - 0.2).abs() < 1e-6);
        assert!((state.fbi - expected_fbi).abs() < 1e-6);
        assert!((state.gc_i - 1.8 * (0.2 + expected_fbi)).abs() < 1e-6);
        assert_eq!(gc_i, state.gc_i);
    }

    #[test]
    fn test_disabled_inhibition_is_zero() {
        let spec = LayerSpecConfig {
            inhibition_enabled: false,
            ..Default::default()
        };
        let mut state = InhibitionState::default();
        for _ in 0..10 {
            assert_eq!(state.step(&spec, 5.0, 1.0), 0.0);
        }
        assert_eq!(state, InhibitionState::default());
    }
}
