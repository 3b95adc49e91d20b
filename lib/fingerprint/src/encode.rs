//! Fingerprint encoders
//!
//! Each encoder maps one record plus precomputed feature statistics to a
//! fixed-length vector. The layout follows the feature order of the
//! statistics, so fingerprints are only comparable when built from the same
//! statistics.

use crate::stats::{References, ScalingMethod, Scaling, Thresholds};
use statprint_core::{Error, FeatureLookup, Result};
use tracing::{trace, warn};

/// Cumulative threshold bits
///
/// For each feature and each of its thresholds, in order, emits 1 when the
/// record's value is `>=` the threshold. A value above the third threshold is
/// also marked above the first and second.
///
/// ```
/// use statprint_core::Record;
/// use statprint_fingerprint::{binaryfp, Thresholds};
///
/// let record: Record = [("AVG", 0.298), ("HR", 250.0)].into();
/// let thresholds: Thresholds = [
///     ("AVG", vec![0.250, 0.275, 0.300]),
///     ("HR", vec![200.0, 400.0, 600.0]),
/// ].into();
/// assert_eq!(binaryfp(&record, &thresholds).unwrap(), vec![1, 1, 0, 1, 0, 0]);
/// ```
pub fn binaryfp<R>(record: &R, thresholds: &Thresholds) -> Result<Vec<u8>>
where
    R: FeatureLookup + ?Sized,
{
    let mut fp = Vec::with_capacity(crate::stats::threshold_bits(thresholds));
    for (feature, quants) in thresholds.iter() {
        let value = record.require(feature)?;
        fp.extend(quants.iter().map(|&t| u8::from(value >= t)));
    }
    trace!(bits = fp.len(), "encoded binary fingerprint");
    Ok(fp)
}

/// Highest-matching-bin bits
///
/// Like [`binaryfp`] but only the highest threshold the value meets is set,
/// which keeps records from matching on every lower threshold. A feature
/// whose value meets no threshold contributes an all-zero group.
pub fn binnedfp<R>(record: &R, thresholds: &Thresholds) -> Result<Vec<u8>>
where
    R: FeatureLookup + ?Sized,
{
    let mut fp = Vec::with_capacity(crate::stats::threshold_bits(thresholds));
    for (feature, quants) in thresholds.iter() {
        let value = record.require(feature)?;
        let start = fp.len();
        fp.resize(start + quants.len(), 0);
        if let Some(bin) = quants.iter().rposition(|&t| value >= t) {
            fp[start + bin] = 1;
        }
    }
    trace!(bits = fp.len(), "encoded binned fingerprint");
    Ok(fp)
}

/// Rescaled feature values, one per feature
///
/// Degenerate parameters (`max == min`, or `std == 0`) yield `0.0` for that
/// feature instead of dividing by zero. NaN values pass through as NaN.
pub fn normalizedfp<R>(record: &R, scaling: &Scaling, method: ScalingMethod) -> Result<Vec<f64>>
where
    R: FeatureLookup + ?Sized,
{
    scaling
        .iter()
        .map(|(feature, &(p1, p2))| {
            let value = record.require(feature)?;
            Ok(rescale(feature, value, p1, p2, method))
        })
        .collect()
}

fn rescale(feature: &str, value: f64, p1: f64, p2: f64, method: ScalingMethod) -> f64 {
    let denom = match method {
        ScalingMethod::Minmax => p2 - p1,
        ScalingMethod::Zscore => p2,
    };
    if denom == 0.0 {
        warn!(feature, %method, "degenerate scaling parameters, encoding as 0.0");
        return 0.0;
    }
    (value - p1) / denom
}

/// Empirical CDF rank of each feature value against its reference values
///
/// `count(reference < value) / count(reference)`: ties are not counted, a
/// value above every observation ranks 1.0, below every observation 0.0.
/// NaN reference cells are skipped; a NaN record value ranks NaN.
///
/// # Errors
/// * [`Error::NotComputable`] if a feature's reference has no values
/// * [`Error::MissingFeature`] if the record lacks a feature
pub fn percentilefp<R>(record: &R, references: &References) -> Result<Vec<f64>>
where
    R: FeatureLookup + ?Sized,
{
    references
        .iter()
        .map(|(feature, reference)| {
            let value = record.require(feature)?;
            percentile_rank(feature, value, reference)
        })
        .collect()
}

fn percentile_rank(feature: &str, value: f64, reference: &[f64]) -> Result<f64> {
    let (total, below) = reference
        .iter()
        .filter(|r| !r.is_nan())
        .fold((0usize, 0usize), |(total, below), &r| {
            (total + 1, below + usize::from(r < value))
        });
    if total == 0 {
        return Err(Error::not_computable(format!(
            "percentile rank against empty reference for feature '{}'",
            feature
        )));
    }
    if value.is_nan() {
        return Ok(f64::NAN);
    }
    Ok(below as f64 / total as f64)
}
