// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Population statistics

use crate::types::{LeabraError, Result};

/// Arithmetic mean of a population of values
///
/// # Errors
///
/// `LeabraError::EmptyPopulation` if `values` is empty: the mean is undefined
/// and is never reported as NaN.
///
/// # Example
/// ```
/// use leabra_neural::mean;
///
/// assert_eq!(mean(&[0.25, 0.75]).unwrap(), 0.5);
/// assert!(mean(&[]).is_err());
/// ```
#[inline]
pub fn mean(values: &[f32]) -> Result<f32> {
    if values.is_empty() {
        return Err(LeabraError::EmptyPopulation);
    }
    Ok(values.iter().sum::<f32>() / values.len() as f32)
}
