// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # leabra-observability
//!
//! Logging setup shared by leabra binaries, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: daily-rotated JSON log files in a timestamped run folder

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known leabra crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "leabra-config",
    "leabra-neural",
    "leabra-layer",
    "leabra-observability",
];

/// Tracing target of a crate name (`leabra-layer` -> `leabra_layer`)
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}
