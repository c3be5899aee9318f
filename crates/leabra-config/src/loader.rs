// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{validate_config, ConfigError, ConfigResult, LeabraConfig, OptionValue, SpecOption};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_FILE_NAME: &str = "leabra_configuration.toml";

/// Find the leabra configuration file
///
/// Search order:
/// 1. `LEABRA_CONFIG_PATH` environment variable
/// 2. Current working directory: `./leabra_configuration.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("LEABRA_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by LEABRA_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet LEABRA_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI overrides of `[layer_spec]` options, keyed by option name
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML or unknown
/// options, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<LeabraConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };
    debug!(path = %config_file.display(), "loading leabra configuration");

    let content = fs::read_to_string(&config_file)?;
    let mut config: LeabraConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    validate_config(&config)?;
    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `LEABRA_LOG_LEVEL` -> `logging.level`
/// - `LEABRA_LOG_FORMAT` -> `logging.format`
/// - `LEABRA_INHIBITION_ENABLED` -> `layer_spec.inhibition_enabled`
/// - `LEABRA_INHIBITION_GAIN` -> `layer_spec.inhibition_gain`
///
/// Values that do not parse are ignored with a warning.
pub fn apply_environment_overrides(config: &mut LeabraConfig) {
    if let Ok(value) = env::var("LEABRA_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("LEABRA_LOG_FORMAT") {
        config.logging.format = value;
    }

    if let Ok(value) = env::var("LEABRA_INHIBITION_ENABLED") {
        config.layer_spec.inhibition_enabled =
            value.to_lowercase() == "true" || value == "1" || value.to_lowercase() == "yes";
    }
    if let Ok(value) = env::var("LEABRA_INHIBITION_GAIN") {
        match value.parse::<f32>() {
            Ok(gain) => config.layer_spec.inhibition_gain = gain,
            Err(_) => warn!(value = %value, "ignoring unparseable LEABRA_INHIBITION_GAIN"),
        }
    }
}

/// Apply CLI argument overrides to the base layer spec
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Option name to textual value (e.g., `{"inhibition_gain": "2.0", "ff0": "0.05"}`)
///
/// # Errors
///
/// Unlike environment overrides, CLI overrides are explicit: an unknown option
/// name or an unparseable value is an error.
pub fn apply_cli_overrides(
    config: &mut LeabraConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    for (name, raw) in cli_args {
        let option: SpecOption = name.parse()?;
        let value = OptionValue::parse_str(raw)?;
        config.layer_spec.set(option, value)?;
    }
    Ok(())
}
