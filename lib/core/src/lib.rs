//! # statprint Core
//!
//! Core types for the statprint fingerprinting library.
//!
//! - [`FeatureMap`] - insertion-ordered feature mapping that fixes fingerprint layout
//! - [`Record`] / [`FeatureLookup`] - key-based access to one entity's features
//! - [`PopulationSource`] - column access over a reference population
//! - [`Error`] - error kinds shared by every statprint crate
//!
//! ## Example
//!
//! ```rust
//! use statprint_core::{FeatureLookup, PopulationSource, Record};
//!
//! let record: Record = [("AVG", 0.298), ("HR", 250.0)].into();
//! assert_eq!(record.require("HR").unwrap(), 250.0);
//!
//! let population: Vec<Record> = vec![record.clone(), [("AVG", 0.250), ("HR", 120.0)].into()];
//! assert_eq!(population.column("AVG").unwrap().len(), 2);
//! ```

pub mod error;
pub mod feature_map;
pub mod record;

/// Scalar numeric kernels (Euclidean distance, quantiles, NaN-aware summaries)
pub mod ops;

pub use error::{Error, Result};
pub use feature_map::FeatureMap;
pub use record::{FeatureLookup, PopulationSource, Record};
