// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Core Types
//!
//! Identity types, unit roles and errors shared by the unit and layer crates.

pub mod error;
pub mod ids;

pub use error::{ensure_shape, Error, LeabraError, Result};
pub use ids::{ConnectionId, UnitKind};
