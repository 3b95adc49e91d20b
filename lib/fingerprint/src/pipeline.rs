//! Fit-once, encode-many pipeline
//!
//! Computes every statistic a [`FingerprintConfig`] asks for over a
//! reference population, then encodes and compares records against it.

use crate::archetype::{archetypefp, ArchetypeSource};
use crate::config::FingerprintConfig;
use crate::encode::{binaryfp, binnedfp, normalizedfp, percentilefp};
use crate::explain::{explain_overlap, level_labels, OverlapExplanation};
use crate::preprocess::{feature_scaling, generate_quantiles_from_specs, reference_distributions};
use crate::scoring::Metric;
use crate::stats::{validate_thresholds, References, ScalingMethod, Scaling, Thresholds};
use serde::{Deserialize, Serialize};
use statprint_core::{FeatureLookup, PopulationSource, Result};
use tracing::debug;

/// Encoding applied by [`FingerprintPipeline::encode`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Binary,
    Binned,
    Normalized,
    Percentile,
}

/// Statistics fitted on a reference population
#[derive(Debug, Clone, PartialEq)]
pub struct FingerprintPipeline {
    thresholds: Thresholds,
    labels: Vec<String>,
    scaling_method: ScalingMethod,
    scaling: Scaling,
    references: References,
}

impl FingerprintPipeline {
    /// Validate `config` and compute its statistics over `population`
    ///
    /// # Errors
    /// * [`statprint_core::Error::InvalidArgument`] for an invalid config, or
    ///   when a feature's levels are not requested in ascending order
    /// * [`statprint_core::Error::MissingFeature`] /
    ///   [`statprint_core::Error::NotComputable`] from preprocessing
    pub fn fit<P>(population: &P, config: &FingerprintConfig) -> Result<Self>
    where
        P: PopulationSource + ?Sized,
    {
        config.validate()?;

        let thresholds = generate_quantiles_from_specs(population, &config.quantiles)?;
        // Binned encoding picks the highest index met, so a descending group
        // would only ever set its last bit.
        validate_thresholds(&thresholds)?;

        let features = config.value_features();
        let scaling = feature_scaling(population, &features, config.scaling)?;
        let references = reference_distributions(population, &features)?;

        debug!(
            bits = crate::stats::threshold_bits(&thresholds),
            features = features.len(),
            scaling = %config.scaling,
            "fitted fingerprint pipeline"
        );

        Ok(Self {
            labels: level_labels(&config.quantiles),
            thresholds,
            scaling_method: config.scaling,
            scaling,
            references,
        })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn scaling(&self) -> &Scaling {
        &self.scaling
    }

    pub fn scaling_method(&self) -> ScalingMethod {
        self.scaling_method
    }

    pub fn references(&self) -> &References {
        &self.references
    }

    /// Bit labels of the binary and binned encodings
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn binary<R: FeatureLookup + ?Sized>(&self, record: &R) -> Result<Vec<u8>> {
        binaryfp(record, &self.thresholds)
    }

    pub fn binned<R: FeatureLookup + ?Sized>(&self, record: &R) -> Result<Vec<u8>> {
        binnedfp(record, &self.thresholds)
    }

    pub fn normalized<R: FeatureLookup + ?Sized>(&self, record: &R) -> Result<Vec<f64>> {
        normalizedfp(record, &self.scaling, self.scaling_method)
    }

    pub fn percentile<R: FeatureLookup + ?Sized>(&self, record: &R) -> Result<Vec<f64>> {
        percentilefp(record, &self.references)
    }

    /// Encode with any method; bit encodings come back as 0.0 / 1.0
    pub fn encode<R: FeatureLookup + ?Sized>(&self, record: &R, encoding: Encoding) -> Result<Vec<f64>> {
        match encoding {
            Encoding::Binary => Ok(widen_bits(self.binary(record)?)),
            Encoding::Binned => Ok(widen_bits(self.binned(record)?)),
            Encoding::Normalized => self.normalized(record),
            Encoding::Percentile => self.percentile(record),
        }
    }

    /// Encode two records the same way and score them
    pub fn compare<A, B>(&self, a: &A, b: &B, encoding: Encoding, metric: Metric) -> Result<f64>
    where
        A: FeatureLookup + ?Sized,
        B: FeatureLookup + ?Sized,
    {
        let fa = self.encode(a, encoding)?;
        let fb = self.encode(b, encoding)?;
        metric.score(&fa, &fb)
    }

    /// Explain the binary-fingerprint overlap of two records
    pub fn explain<A, B>(&self, a: &A, b: &B) -> Result<OverlapExplanation>
    where
        A: FeatureLookup + ?Sized,
        B: FeatureLookup + ?Sized,
    {
        explain_overlap(&self.labels, &self.binary(a)?, &self.binary(b)?)
    }

    /// Archetype distances are independent of the fitted statistics; exposed
    /// here so callers can encode every fingerprint kind from one place.
    pub fn archetypes<R, A>(&self, record: &R, archetypes: &A) -> Result<Vec<f64>>
    where
        R: FeatureLookup + ?Sized,
        A: ArchetypeSource + ?Sized,
    {
        archetypefp(record, archetypes)
    }
}

fn widen_bits(bits: Vec<u8>) -> Vec<f64> {
    bits.into_iter().map(f64::from).collect()
}
