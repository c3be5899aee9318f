// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Property tests for the layer inhibition dynamics
//!
//! Covers:
//! - disabled inhibition stays at zero
//! - forced activities are reported unchanged
//! - shape mismatches for every wrong length
//! - geometric convergence of feedback inhibition
//! - feedforward threshold clamp
//! - average activity is the exact mean of post-cycle activities

use leabra_config::{LayerSpecConfig, OptionValue};
use leabra_layer::{feedforward_inhibition, InhibitionState, Layer, LayerSpec};
use leabra_neural::{LeabraError, RateUnit, RateUnitParameters, Unit, UnitKind};
use proptest::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Unit with a fixed conductance and a fixed activity
#[derive(Debug, Clone)]
struct FixedUnit {
    g_e: f32,
    act: f32,
}

impl Unit for FixedUnit {
    fn activity(&self) -> f32 {
        self.act
    }
    fn excitatory_conductance(&self) -> f32 {
        self.g_e
    }
    fn compute_net_input(&mut self) {}
    fn cycle(&mut self, _inhibitory_conductance: f32) {}
    fn reset(&mut self) {
        self.act = 0.0;
    }
    fn force_activity(&mut self, value: f32) {
        self.act = value;
    }
    fn add_excitatory(&mut self, value: f32) {
        self.g_e += value;
    }
}

fn rate_layer(spec: LayerSpec, size: usize) -> Layer<RateUnit> {
    Layer::with_rate_units(size, spec.shared(), RateUnitParameters::default(), UnitKind::Hidden)
        .unwrap()
}

fn disabled_spec() -> LayerSpec {
    LayerSpec::from_options([("inhibition_enabled", OptionValue::Bool(false))]).unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn disabled_inhibition_stays_zero(size in 1usize..50, cycles in 1usize..20) {
        let mut layer = rate_layer(disabled_spec(), size);
        for _ in 0..cycles {
            layer.cycle().unwrap();
            prop_assert_eq!(layer.inhibitory_conductance(), 0.0);
            prop_assert_eq!(layer.feedforward_inhibition(), 0.0);
            prop_assert_eq!(layer.feedback_inhibition(), 0.0);
        }
    }

    #[test]
    fn disabled_inhibition_stays_zero_under_drive(
        drive in prop::collection::vec(0.0f32..2.0, 1..50),
        cycles in 1usize..20,
    ) {
        let mut layer = rate_layer(disabled_spec(), drive.len());
        for _ in 0..cycles {
            layer.add_excitatory(&drive).unwrap();
            layer.cycle().unwrap();
            prop_assert_eq!(layer.inhibitory_conductance(), 0.0);
            prop_assert_eq!(layer.feedforward_inhibition(), 0.0);
            prop_assert_eq!(layer.feedback_inhibition(), 0.0);
        }
    }

    #[test]
    fn force_activity_is_reported_unchanged(
        values in prop::collection::vec(-10.0f32..10.0, 1..100)
    ) {
        let mut layer = rate_layer(LayerSpec::default(), values.len());
        layer.force_activity(&values).unwrap();
        prop_assert_eq!(layer.activities().unwrap(), values);
    }

    #[test]
    fn wrong_length_is_a_shape_mismatch(size in 1usize..40, len in 0usize..40) {
        prop_assume!(size != len);
        let mut layer = rate_layer(LayerSpec::default(), size);
        let values = vec![0.5; len];
        let expected = LeabraError::ShapeMismatch { expected: size, actual: len };

        prop_assert_eq!(layer.force_activity(&values), Err(expected.clone()));
        prop_assert_eq!(layer.add_excitatory(&values), Err(expected));
    }

    #[test]
    fn feedback_converges_geometrically(
        fb_dt in 0.05f32..=1.0,
        fb in 0.0f32..3.0,
        average in 0.0f32..1.0,
        initial in 0.0f32..2.0,
        k in 1i32..40,
    ) {
        let config = LayerSpecConfig {
            feedback_time_constant: fb_dt,
            feedback_scale: fb,
            ..Default::default()
        };
        let spec = LayerSpec::new(config).unwrap();
        let mut state = InhibitionState { fbi: initial, ..Default::default() };

        for _ in 0..k {
            spec.inhibition(&mut state, 0.0, average);
        }

        let target = fb * average;
        let expected = target + (initial - target) * (1.0 - fb_dt).powi(k);
        prop_assert!(
            (state.fbi - expected).abs() < 1e-4,
            "fbi {} expected {}",
            state.fbi,
            expected
        );
        // monotone: never overshoots the target
        prop_assert!((state.fbi - target).abs() <= (initial - target).abs() + 1e-5);
    }

    #[test]
    fn feedforward_follows_threshold(
        conductances in prop::collection::vec(0.0f32..1.0, 1..100),
        ff in 0.0f32..3.0,
        ff0 in 0.0f32..1.0,
    ) {
        let spec = LayerSpec::from_options([
            ("feedforward_scale", OptionValue::Real(ff)),
            ("feedforward_threshold", OptionValue::Real(ff0)),
        ])
        .unwrap();
        let units = conductances.iter().map(|&g_e| FixedUnit { g_e, act: 0.0 }).collect();
        let mut layer = Layer::with_units(units, spec.shared(), UnitKind::Hidden);

        layer.cycle().unwrap();

        let mean = conductances.iter().sum::<f32>() / conductances.len() as f32;
        if mean <= ff0 {
            prop_assert_eq!(layer.feedforward_inhibition(), 0.0);
        } else {
            let expected = ff * (mean - ff0);
            prop_assert!((layer.feedforward_inhibition() - expected).abs() < 1e-5);
        }
        prop_assert_eq!(
            layer.feedforward_inhibition(),
            feedforward_inhibition(layer.spec().config(), mean)
        );
    }

    #[test]
    fn average_activity_is_mean_of_activities(
        drive in prop::collection::vec(0.0f32..2.0, 1..=100),
        cycles in 1usize..10,
    ) {
        let mut layer = rate_layer(LayerSpec::default(), drive.len());
        for _ in 0..cycles {
            layer.add_excitatory(&drive).unwrap();
            layer.cycle().unwrap();

            let activities = layer.activities().unwrap();
            let mean = activities.iter().sum::<f32>() / activities.len() as f32;
            prop_assert_eq!(layer.average_activity(), mean);
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn feedback_converges_inside_a_layer() {
    // Units hold a constant activity, so the average activity is fixed at 0.4
    // from the first cycle on
    let spec = LayerSpec::default();
    let fb_dt = spec.config().feedback_time_constant;
    let units = vec![FixedUnit { g_e: 0.0, act: 0.4 }; 6];
    let mut layer = Layer::with_units(units, spec.shared(), UnitKind::Hidden);

    layer.cycle().unwrap();
    assert_eq!(layer.feedback_inhibition(), 0.0);
    assert!((layer.average_activity() - 0.4).abs() < 1e-6);

    for k in 1..=20 {
        layer.cycle().unwrap();
        let target = layer.average_activity();
        let expected = target * (1.0 - (1.0 - fb_dt).powi(k));
        assert!(
            (layer.feedback_inhibition() - expected).abs() < 1e-5,
            "cycle {}: fbi {} expected {}",
            k,
            layer.feedback_inhibition(),
            expected
        );
    }
}

#[test]
fn five_unit_reference_scenario() {
    let spec = LayerSpec::from_options([
        ("inhibition_enabled", OptionValue::Bool(true)),
        ("feedforward_scale", OptionValue::Real(1.0)),
        ("feedforward_threshold", OptionValue::Real(0.1)),
        ("feedback_scale", OptionValue::Real(1.0)),
        ("feedback_time_constant", OptionValue::Real(1.0 / 1.4)),
        ("inhibition_gain", OptionValue::Real(1.8)),
    ])
    .unwrap();
    let units = vec![FixedUnit { g_e: 0.3, act: 0.0 }; 5];
    let mut layer = Layer::with_units(units, spec.shared(), UnitKind::Hidden);

    layer.cycle().unwrap();

    assert!((layer.feedforward_inhibition() - 0.2).abs() < 1e-6);
    assert!(layer.feedback_inhibition().abs() < 1e-6);
    assert!((layer.inhibitory_conductance() - 0.36).abs() < 1e-6);
}

#[test]
fn empty_layer_fails_with_empty_population() {
    let mut layer: Layer<FixedUnit> =
        Layer::with_units(Vec::new(), LayerSpec::default().shared(), UnitKind::Hidden);

    assert_eq!(layer.activities(), Err(LeabraError::EmptyPopulation));
    assert_eq!(layer.cycle(), Err(LeabraError::EmptyPopulation));
}

#[test]
fn reset_preserves_inhibition_and_average_activity() {
    let units = vec![FixedUnit { g_e: 0.5, act: 0.7 }; 3];
    let mut layer = Layer::with_units(units, LayerSpec::default().shared(), UnitKind::Hidden);
    layer.cycle().unwrap();
    layer.cycle().unwrap();
    let inhibition = layer.inhibition();
    let average = layer.average_activity();

    layer.reset();

    assert_eq!(layer.activities().unwrap(), vec![0.0; 3]);
    assert_eq!(layer.inhibition(), inhibition);
    assert_eq!(layer.average_activity(), average);
}
