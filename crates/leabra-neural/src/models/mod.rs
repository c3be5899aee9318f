// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Unit Models
//!
//! The [`Unit`] trait is what a layer needs from its units. [`RateUnit`] is a
//! reference point-neuron with a thresholded rate transfer function.
//!
//! ## Adding a New Unit Model
//!
//! 1. Create `src/models/your_model.rs`
//! 2. Implement `Unit` (and `ModelParameters` for its parameters)
//! 3. Add tests
//! 4. Export in `mod.rs`

pub mod rate;
pub mod traits;

pub use rate::{RateUnit, RateUnitParameters};
pub use traits::{ModelParameters, Unit};
