//! # statprint
//!
//! Turn tabular numeric records (player statistics, product metrics, ...)
//! into fixed-length fingerprints and score how similar two entities are.
//!
//! ## Encodings
//!
//! - **Binary**: one bit per quantile threshold met, cumulative
//! - **Binned**: only the highest threshold met is set
//! - **Normalized**: min/max or z-score rescaled values
//! - **Percentile**: empirical CDF rank against a reference population
//! - **Archetype**: Euclidean distance to each labelled centroid
//!
//! ## Scores
//!
//! Jaccard/Tanimoto overlap for bit fingerprints, Manhattan distance and
//! cosine similarity for real-valued ones.
//!
//! ## Quick Start
//!
//! ```rust
//! use statprint::prelude::*;
//!
//! // Reference population, one record per player
//! let population: Vec<Record> = (0..100)
//!     .map(|i| [("AVG", 0.200 + f64::from(i) * 0.001), ("HR", f64::from(i) * 6.0)].into())
//!     .collect();
//!
//! let config = FingerprintConfig::new(vec![
//!     QuantileSpec::new("AVG", vec![0.5, 0.75, 0.9]),
//!     QuantileSpec::new("HR", vec![0.5, 0.75, 0.9]),
//! ]);
//! let pipeline = FingerprintPipeline::fit(&population, &config).unwrap();
//!
//! let a: Record = [("AVG", 0.298), ("HR", 500.0)].into();
//! let b: Record = [("AVG", 0.281), ("HR", 540.0)].into();
//! let score = pipeline.compare(&a, &b, Encoding::Binary, Metric::Tanimoto).unwrap();
//! assert!(score > 0.5);
//! ```
//!
//! ## Crate Structure
//!
//! - `statprint-core` - feature maps, record/population access, numeric kernels, errors
//! - `statprint-fingerprint` - preprocessing, encoders, archetypes, scoring, explain

pub mod logging;

// Re-export core types
pub use statprint_core::{Error, FeatureLookup, FeatureMap, PopulationSource, Record, Result};

// Re-export fingerprinting
pub use statprint_fingerprint::{
    archetypefp, binaryfp, binnedfp, bit_labels, cosine_sim, explain_overlap, feature_scaling,
    generate_quantiles, generate_quantiles_from_specs, jaccard, level_labels, manhattan,
    normalizedfp, pairwise, percentilefp, rank, reference_distributions, tanimoto,
    validate_thresholds, ArchetypeSource, ArchetypeTable, Centroid, Encoding, FingerprintConfig,
    FingerprintPipeline, Metric, OverlapExplanation, PairScore, QuantileSpec, References,
    ScaleParams, Scaling, ScalingMethod, Thresholds,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        archetypefp, binaryfp, binnedfp, cosine_sim, jaccard, manhattan, normalizedfp,
        percentilefp, tanimoto,
        ArchetypeTable, Encoding, Error, FeatureLookup, FeatureMap, FingerprintConfig,
        FingerprintPipeline, Metric, PopulationSource, QuantileSpec, Record, Result,
        ScalingMethod, Thresholds,
    };
}

/// Scalar numeric kernels
pub mod ops {
    pub use statprint_core::ops::{l2_distance, nan_mean_std, nan_min_max, quantile_sorted, sorted_finite};
}
