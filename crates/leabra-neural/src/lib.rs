// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Leabra Unit Computation
//!
//! Everything a layer needs to know about its units:
//! - **Types**: `UnitKind`, `ConnectionId`, `LeabraError`
//! - **Models**: the `Unit` trait and the reference `RateUnit`
//! - **Utils**: population statistics

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod models;
pub mod types;
pub mod utils;

pub use utils::*;

pub use types::{ensure_shape, ConnectionId, Error, LeabraError, Result, UnitKind};

pub use models::{ModelParameters, RateUnit, RateUnitParameters, Unit};
