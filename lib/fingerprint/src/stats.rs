//! Feature statistics definitions
//!
//! Per-feature summaries computed once over a reference population and
//! reused for every record encoded against it. All of them are keyed by a
//! [`FeatureMap`], so the feature order of the statistics is the layout of
//! every fingerprint produced from them.

use serde::{Deserialize, Serialize};
use statprint_core::{Error, FeatureMap, Result};
use std::fmt;
use std::str::FromStr;

/// Ascending quantile thresholds per feature
pub type Thresholds = FeatureMap<Vec<f64>>;

/// `(min, max)` for [`ScalingMethod::Minmax`], `(mean, std)` for [`ScalingMethod::Zscore`]
pub type ScaleParams = (f64, f64);

/// Scaling parameters per feature
pub type Scaling = FeatureMap<ScaleParams>;

/// Full reference distribution per feature, used for percentile ranks
pub type References = FeatureMap<Vec<f64>>;

/// How raw feature values are rescaled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMethod {
    /// `(x - min) / (max - min)`
    Minmax,
    /// `(x - mean) / std`
    #[default]
    Zscore,
}

impl ScalingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalingMethod::Minmax => "minmax",
            ScalingMethod::Zscore => "zscore",
        }
    }
}

impl fmt::Display for ScalingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalingMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minmax" => Ok(ScalingMethod::Minmax),
            "zscore" => Ok(ScalingMethod::Zscore),
            other => Err(Error::invalid(format!(
                "invalid scaling method '{}', use 'minmax' or 'zscore'",
                other
            ))),
        }
    }
}

/// Quantile levels requested for one feature
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuantileSpec {
    pub feature: String,

    /// Levels in [0, 1], in the order the bits should appear
    pub levels: Vec<f64>,

    /// Features where a low value is the notable one (strikeout rate,
    /// walk rate against). Each level `q` is taken as `1 - q`.
    #[serde(default)]
    pub lower_is_better: bool,
}

impl QuantileSpec {
    pub fn new(feature: impl Into<String>, levels: Vec<f64>) -> Self {
        Self {
            feature: feature.into(),
            levels,
            lower_is_better: false,
        }
    }

    pub fn lower_is_better(feature: impl Into<String>, levels: Vec<f64>) -> Self {
        Self {
            feature: feature.into(),
            levels,
            lower_is_better: true,
        }
    }

    /// Levels actually evaluated against the population
    ///
    /// Lower-is-better levels are inverted onto the level grid (`0.9` becomes
    /// exactly `0.1`) and put in ascending order, so the thresholds computed
    /// from them stay ascending.
    pub fn effective_levels(&self) -> Vec<f64> {
        if !self.lower_is_better {
            return self.levels.clone();
        }
        let mut levels: Vec<f64> = self.levels.iter().map(|&q| invert_level(q)).collect();
        levels.sort_by(|a, b| a.total_cmp(b));
        levels
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(Error::invalid(format!(
                "feature '{}' has no quantile levels",
                self.feature
            )));
        }
        self.levels
            .iter()
            .try_for_each(|&q| check_level(&self.feature, q))
    }
}

const LEVEL_GRID: f64 = 1e9;

fn invert_level(q: f64) -> f64 {
    ((1.0 - q) * LEVEL_GRID).round() / LEVEL_GRID
}

pub(crate) fn check_level(feature: &str, q: f64) -> Result<()> {
    if (0.0..=1.0).contains(&q) {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "quantile level {} for feature '{}' is outside [0, 1]",
            q, feature
        )))
    }
}

/// Check that every feature's thresholds are non-decreasing and not NaN
pub fn validate_thresholds(thresholds: &Thresholds) -> Result<()> {
    for (feature, quants) in thresholds.iter() {
        if quants.iter().any(|t| t.is_nan()) {
            return Err(Error::invalid(format!(
                "thresholds for feature '{}' contain NaN",
                feature
            )));
        }
        if quants.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::invalid(format!(
                "thresholds for feature '{}' are not in ascending order",
                feature
            )));
        }
    }
    Ok(())
}

/// Total fingerprint length produced by a set of thresholds
pub fn threshold_bits(thresholds: &Thresholds) -> usize {
    thresholds.values().iter().map(Vec::len).sum()
}
