// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for layer and unit operations

/// Error types for layer and unit operations
///
/// Every variant is a contract violation by the caller; none is transient.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LeabraError {
    /// A per-unit sequence did not have one entry per unit
    #[error("Array size mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A population statistic was requested from a layer with no units
    #[error("Empty population: the layer has no units")]
    EmptyPopulation,

    /// Unit parameters failed validation
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = core::result::Result<T, LeabraError>;
pub type Error = LeabraError;

/// Check that a per-unit sequence has exactly `expected` entries
#[inline]
pub fn ensure_shape(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(LeabraError::ShapeMismatch { expected, actual })
    }
}
