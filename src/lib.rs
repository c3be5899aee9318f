// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Leabra - rate-coded layers with feedforward/feedback inhibition
//!
//! A layer holds a fixed population of units and a shared, immutable
//! `LayerSpec`. Every cycle the spec computes the layer inhibitory conductance
//! from the mean excitatory drive (feedforward) and the previous cycle's mean
//! activity (feedback), hands it to every unit, and records the new mean
//! activity.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! leabra = "0.1"  # Default: parallel + observability
//! ```
//!
//! ```rust
//! use leabra::prelude::*;
//!
//! let spec = LayerSpec::from_options([("inhibition_gain", OptionValue::Real(2.0))])?.shared();
//! let mut layer =
//!     Layer::with_rate_units(10, spec, RateUnitParameters::default(), UnitKind::Hidden)?;
//!
//! for _ in 0..20 {
//!     layer.add_excitatory(&[0.6; 10])?;
//!     layer.cycle()?;
//! }
//! println!("{}", layer.report());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - **`parallel`** (default): cycle independent layers on the rayon pool
//! - **`observability`** (default): logging initialization for binaries
//! - **`file-logging`**: rotated JSON log files
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: leabra-config                              │
//! │  (spec options, TOML loader, overrides, validation)     │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Units: leabra-neural                                   │
//! │  (Unit trait, RateUnit, LeabraError)                    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Layers: leabra-layer                                   │
//! │  (Layer, LayerSpec, cycle, report)                      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use leabra_config as config;

// Re-export computation
pub use leabra_layer as layer;
pub use leabra_neural as neural;

// Re-export infrastructure
#[cfg(feature = "observability")]
pub use leabra_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{
        load_config, ConfigError, ConfigResult, LayerSpecConfig, LeabraConfig, OptionValue,
        SpecOption,
    };
    pub use crate::layer::{
        cycle_layer, cycle_layers, InhibitionState, Layer, LayerReport, LayerSpec,
    };
    pub use crate::neural::{LeabraError, RateUnit, RateUnitParameters, Unit, UnitKind};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let spec = LayerSpec::default();
        assert!(spec.inhibition_enabled());
        let _kind = UnitKind::Hidden;
    }

    #[test]
    fn test_parallel_feature_reaches_layer_crate() {
        assert_eq!(crate::layer::PARALLEL, cfg!(feature = "parallel"));
    }
}
