// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Drive a layer of rate units with constant excitation and print its
//! inhibition report.
//!
//! Configuration comes from `leabra_configuration.toml` when one is found (or
//! `--config` names one), otherwise from the built-in defaults. Trailing
//! `option=value` arguments override the base layer spec.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use leabra::config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    validate_config, LeabraConfig,
};
use leabra::layer::{Layer, LayerSpec};
use leabra::neural::{RateUnitParameters, UnitKind};
use leabra::observability::{debug_flags_help, init_logging, parse_debug_flags, LoggingConfig};
use tracing::{debug, info};

struct Args {
    config: Option<PathBuf>,
    spec: Option<String>,
    cycles: u64,
    size: usize,
    drive: f32,
    json: bool,
    overrides: HashMap<String, String>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: layer_trace [--config <path>] [--spec <name>] [--cycles <n>] [--size <n>] \
         [--drive <g_e>] [--json] [option=value ...]\n\n\
         Defaults:\n\
         - cycles: 50\n\
         - size: 20\n\
         - drive: 0.5\n\n\
         {}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> T {
    let raw = value.unwrap_or_else(|| usage_and_exit());
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value for {flag}: {raw}");
        usage_and_exit();
    })
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        spec: None,
        cycles: 50,
        size: 20,
        drive: 0.5,
        json: false,
        overrides: HashMap::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config = Some(PathBuf::from(v));
            }
            "--spec" => {
                parsed.spec = Some(args.next().unwrap_or_else(|| usage_and_exit()));
            }
            "--cycles" => parsed.cycles = parse_value("--cycles", args.next()),
            "--size" => parsed.size = parse_value("--size", args.next()),
            "--drive" => parsed.drive = parse_value("--drive", args.next()),
            "--json" => parsed.json = true,
            "-h" | "--help" => usage_and_exit(),
            // Consumed by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => match other.split_once('=') {
                Some((name, value)) if !name.starts_with('-') => {
                    parsed.overrides.insert(name.to_string(), value.to_string());
                }
                _ => {
                    eprintln!("Unknown argument: {other}");
                    usage_and_exit();
                }
            },
        }
    }

    parsed
}

fn resolve_config(args: &Args) -> Result<LeabraConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => find_config_file().ok(),
    };

    if let Some(path) = path {
        return load_config(Some(path.as_path()), Some(&args.overrides))
            .with_context(|| format!("Failed to load {}", path.display()));
    }

    let mut config = LeabraConfig::default();
    apply_environment_overrides(&mut config);
    apply_cli_overrides(&mut config, &args.overrides)?;
    validate_config(&config)?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = parse_args();
    let config = resolve_config(&args)?;

    let debug_flags = parse_debug_flags();
    let logging = LoggingConfig::new(config.logging.level.as_str(), &config.logging.format)?;
    let _guard = init_logging(&debug_flags, &logging)?;

    let spec_config = match &args.spec {
        Some(name) => config.layer_spec(name)?,
        None => config.layer_spec.clone(),
    };
    let spec = LayerSpec::new(spec_config)?.shared();

    let mut layer = Layer::with_rate_units(
        args.size,
        spec,
        RateUnitParameters::default(),
        UnitKind::Hidden,
    )?
    .with_name(args.spec.as_deref().unwrap_or("trace"));

    info!(
        size = args.size,
        cycles = args.cycles,
        drive = args.drive,
        "tracing layer"
    );

    let drive = vec![args.drive; args.size];
    for _ in 0..args.cycles {
        layer.add_excitatory(&drive)?;
        layer.cycle()?;
        debug!(
            cycle = layer.cycle_count(),
            gc_i = layer.inhibitory_conductance(),
            avg_act = layer.average_activity(),
            "cycle complete"
        );
    }

    let report = layer.report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}
