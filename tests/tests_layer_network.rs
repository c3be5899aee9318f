// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests through the umbrella crate: configuration file to shared
//! spec, layers driven by other layers, and reporting.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use leabra::neural::ConnectionId;
use leabra::prelude::*;
use tempfile::tempdir;

const CONFIG: &str = r#"
[logging]
level = "warn"

[layer_spec]
inhibition_gain = 2.0

[layer_specs.hidden]
ff0 = 0.05

[layer_specs.open]
lay_inhib = false
"#;

fn load(content: &str) -> ConfigResult<LeabraConfig> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leabra_configuration.toml");
    fs::write(&path, content).unwrap();
    load_config(Some(path.as_path()), None)
}

fn rate_layer(spec: Arc<LayerSpec>, size: usize, kind: UnitKind) -> Layer<RateUnit> {
    Layer::with_rate_units(size, spec, RateUnitParameters::default(), kind).unwrap()
}

#[test]
fn test_named_spec_from_file_is_shared_by_layers() {
    let config = load(CONFIG).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.layer_spec_names().collect::<Vec<_>>(), vec!["hidden", "open"]);

    let spec = LayerSpec::new(config.layer_spec("hidden").unwrap()).unwrap().shared();
    assert_eq!(spec.config().inhibition_gain, 2.0);
    assert_eq!(spec.config().feedforward_threshold, 0.05);

    let mut first = rate_layer(Arc::clone(&spec), 4, UnitKind::Hidden);
    let mut second = rate_layer(Arc::clone(&spec), 6, UnitKind::Hidden);
    assert_eq!(Arc::strong_count(&spec), 3);

    first.add_excitatory(&[0.5; 4]).unwrap();
    first.cycle().unwrap();
    second.cycle().unwrap();

    // Cycling never touches the shared spec
    assert_eq!(spec.config(), &config.layer_spec("hidden").unwrap());
    assert!(first.inhibitory_conductance() > 0.0);
    assert_eq!(second.inhibitory_conductance(), 0.0);
}

#[test]
fn test_unknown_option_in_file_is_rejected() {
    let result = load("[layer_spec]\nfoo = 1.0\n");
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_unknown_option_in_named_spec_fails_at_load() {
    let result = load("[layer_specs.broken]\nfoo = 1.0\n");
    assert!(matches!(result, Err(ConfigError::UnknownOption(ref name)) if name == "foo"));

    let config = load(CONFIG).unwrap();
    assert!(matches!(
        config.layer_spec("missing"),
        Err(ConfigError::UnknownSpec(_))
    ));
}

#[test]
fn test_cli_overrides_apply_to_base_spec() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leabra_configuration.toml");
    fs::write(&path, CONFIG).unwrap();

    let mut cli = HashMap::new();
    cli.insert("g_i".to_string(), "1.5".to_string());
    let config = load_config(Some(path.as_path()), Some(&cli)).unwrap();
    assert_eq!(config.layer_spec.inhibition_gain, 1.5);

    cli.insert("bogus".to_string(), "1".to_string());
    assert!(matches!(
        load_config(Some(path.as_path()), Some(&cli)),
        Err(ConfigError::UnknownOption(_))
    ));
}

#[test]
fn test_inhibition_tempers_activity() {
    let inhibited = LayerSpec::default().shared();
    let open = LayerSpec::from_options([("inhibition_enabled", OptionValue::Bool(false))])
        .unwrap()
        .shared();

    let mut layers = vec![
        rate_layer(inhibited, 8, UnitKind::Hidden).with_name("inhibited"),
        rate_layer(open, 8, UnitKind::Hidden).with_name("open"),
    ];

    for _ in 0..30 {
        for layer in &mut layers {
            layer.add_excitatory(&[0.6; 8]).unwrap();
        }
        cycle_layers(&mut layers).unwrap();
    }

    let inhibited_act = layers[0].average_activity();
    let open_act = layers[1].average_activity();
    assert!(open_act > 0.9, "uninhibited layer should saturate, got {}", open_act);
    assert!(
        inhibited_act < open_act,
        "inhibition should lower activity: {} vs {}",
        inhibited_act,
        open_act
    );
    assert_eq!(layers[0].cycle_count(), 30);
}

#[test]
fn test_input_layer_drives_hidden_layer() {
    let spec = LayerSpec::default().shared();
    let mut input = rate_layer(Arc::clone(&spec), 4, UnitKind::Input);
    let mut hidden = rate_layer(spec, 4, UnitKind::Hidden);

    let projection = ConnectionId(0);
    input.add_outgoing_connection(projection);
    hidden.add_incoming_connection(projection);
    assert_eq!(input.outgoing_connections(), &[projection]);
    assert_eq!(hidden.incoming_connections(), &[projection]);

    let pattern = [1.0, 1.0, 0.0, 0.0];
    input.force_activity(&pattern).unwrap();
    input.cycle().unwrap();

    // Clamped units hold their forced activity
    assert_eq!(input.activities().unwrap(), pattern.to_vec());
    assert_eq!(input.average_activity(), 0.5);

    hidden.add_excitatory(&input.activities().unwrap()).unwrap();
    hidden.cycle().unwrap();

    let conductances = hidden.excitatory_conductances();
    let mean_g_e = conductances.iter().sum::<f32>() / conductances.len() as f32;
    let expected_ffi = (mean_g_e - 0.1).max(0.0);
    assert!((hidden.feedforward_inhibition() - expected_ffi).abs() < 1e-6);
    assert_eq!(hidden.feedback_inhibition(), 0.0);
    assert!((hidden.inhibitory_conductance() - 1.8 * expected_ffi).abs() < 1e-6);
}

#[test]
fn test_shape_and_empty_errors_surface_through_facade() {
    let spec = LayerSpec::default().shared();
    let mut layer = rate_layer(Arc::clone(&spec), 3, UnitKind::Hidden);
    assert_eq!(
        layer.add_excitatory(&[0.1; 2]),
        Err(LeabraError::ShapeMismatch {
            expected: 3,
            actual: 2
        })
    );

    let mut empty = rate_layer(spec, 0, UnitKind::Hidden);
    assert_eq!(empty.cycle(), Err(LeabraError::EmptyPopulation));
    assert_eq!(empty.activities(), Err(LeabraError::EmptyPopulation));
}

#[test]
fn test_report_serializes_to_json() {
    let mut layer =
        rate_layer(LayerSpec::default().shared(), 5, UnitKind::Hidden).with_name("hidden");
    layer.add_excitatory(&[0.42; 5]).unwrap();
    layer.cycle().unwrap();

    let report = layer.report();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["name"], "hidden");
    assert_eq!(json["kind"], "hidden");
    assert_eq!(json["size"], 5);
    assert_eq!(json["cycle"], 1);
    assert_eq!(json["parameters"]["g_i"].as_f64().unwrap() as f32, 1.8);
    assert_eq!(
        json["state"]["gc_i"].as_f64().unwrap() as f32,
        layer.inhibitory_conductance()
    );

    let text = report.to_string();
    assert!(text.contains("Parameters:"));
    assert!(text.contains("gc_i"));
}
