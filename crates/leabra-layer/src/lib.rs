// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Leabra Layer
//!
//! A layer of units regulated by feedforward/feedback inhibition.
//!
//! - **Layer**: fixed-size unit population, inhibition state, activity statistics
//! - **LayerSpec**: validated, shareable inhibition policy
//! - **Cycle**: net input, inhibition, unit settling, statistics
//!
//! ```rust
//! use leabra_layer::{Layer, LayerSpec};
//! use leabra_neural::{RateUnitParameters, UnitKind};
//!
//! let spec = LayerSpec::default().shared();
//! let mut layer =
//!     Layer::with_rate_units(5, spec, RateUnitParameters::default(), UnitKind::Hidden)?;
//!
//! layer.add_excitatory(&[0.5; 5])?;
//! layer.cycle()?;
//! assert!(layer.inhibitory_conductance() > 0.0);
//! # Ok::<(), leabra_neural::LeabraError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Whether `cycle_layers` spreads layers over the rayon pool
pub const PARALLEL: bool = cfg!(feature = "parallel");

pub mod cycle;
pub mod inhibition;
pub mod layer;
pub mod report;
pub mod spec;

pub use cycle::{cycle_layer, cycle_layers};
pub use inhibition::{feedback_step, feedforward_inhibition, InhibitionState};
pub use layer::Layer;
pub use report::{LayerReport, ReportParameters, ReportState};
pub use spec::LayerSpec;
