//! # statprint Fingerprint
//!
//! Fixed-length fingerprints for tabular numeric records, and the scores
//! used to compare them.
//!
//! ## Features
//!
//! - **Preprocessing**: quantile thresholds, min/max and mean/std scaling,
//!   reference distributions computed once per population
//! - **Encoders**: binary (cumulative thresholds), binned (highest threshold),
//!   normalized, percentile rank and archetype distance fingerprints
//! - **Scoring**: Jaccard/Tanimoto overlap, Manhattan distance, cosine similarity
//! - **Explainability**: named bits and per-threshold overlap breakdowns
//!
//! ## Example
//!
//! ```rust
//! use statprint_core::Record;
//! use statprint_fingerprint::{binaryfp, binnedfp, jaccard, Thresholds};
//!
//! let thresholds: Thresholds = [
//!     ("AVG", vec![0.250, 0.275, 0.300]),
//!     ("HR", vec![200.0, 400.0, 600.0]),
//! ].into();
//!
//! let a: Record = [("AVG", 0.298), ("HR", 250.0)].into();
//! let b: Record = [("AVG", 0.310), ("HR", 180.0)].into();
//!
//! let fa = binaryfp(&a, &thresholds).unwrap();
//! let fb = binaryfp(&b, &thresholds).unwrap();
//! assert_eq!(fa, vec![1, 1, 0, 1, 0, 0]);
//! assert_eq!(binnedfp(&a, &thresholds).unwrap(), vec![0, 1, 0, 1, 0, 0]);
//!
//! let score = jaccard(&fa, &fb).unwrap();
//! assert!((score - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Population  │────>│ Preprocess  │────>│ Statistics  │
//! │  (columns)  │     │ (quantiles) │     │ (per feat.) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//! ┌─────────────┐     ┌─────────────┐            │
//! │   Record    │────>│  Encoders   │<───────────┘
//! │ (feat→val)  │     │ (record→fp) │
//! └─────────────┘     └─────────────┘
//!                            │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Scoring    │────>│  Explain    │
//!                     │ (fp × fp)   │     │  (bits)     │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod stats;
pub mod preprocess;
pub mod encode;
pub mod archetype;
pub mod scoring;
pub mod config;
pub mod pipeline;
pub mod explain;

pub use stats::{
    validate_thresholds,
    QuantileSpec,
    References,
    ScaleParams,
    Scaling,
    ScalingMethod,
    Thresholds,
};
pub use preprocess::{
    feature_scaling,
    generate_quantiles,
    generate_quantiles_from_specs,
    reference_distributions,
};
pub use encode::{binaryfp, binnedfp, normalizedfp, percentilefp};
pub use archetype::{archetypefp, ArchetypeSource, ArchetypeTable, Centroid};
pub use scoring::{cosine_sim, jaccard, manhattan, pairwise, rank, tanimoto, Metric, PairScore};
pub use config::FingerprintConfig;
pub use pipeline::{Encoding, FingerprintPipeline};
pub use explain::{bit_labels, explain_overlap, level_labels, OverlapExplanation};
