//! Fingerprint configuration
//!
//! Declarative description of which statistics to compute over a reference
//! population. Usually loaded from JSON:
//!
//! ```json
//! {
//!   "quantiles": [
//!     { "feature": "AVG", "levels": [0.5, 0.75, 0.9] },
//!     { "feature": "K%", "levels": [0.5, 0.75, 0.9], "lower_is_better": true }
//!   ],
//!   "scaling": "minmax",
//!   "features": ["AVG", "HR"]
//! }
//! ```

use crate::stats::{QuantileSpec, ScalingMethod};
use serde::{Deserialize, Serialize};
use statprint_core::{Error, Result};

/// Statistics to compute for a [`crate::FingerprintPipeline`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FingerprintConfig {
    /// Quantile thresholds for the binary and binned encodings, in layout order
    #[serde(default)]
    pub quantiles: Vec<QuantileSpec>,

    /// Scaling used by the normalized encoding
    #[serde(default)]
    pub scaling: ScalingMethod,

    /// Features for the normalized and percentile encodings. Falls back to
    /// the quantile features when empty.
    #[serde(default)]
    pub features: Vec<String>,
}

impl FingerprintConfig {
    pub fn new(quantiles: Vec<QuantileSpec>) -> Self {
        Self {
            quantiles,
            ..Default::default()
        }
    }

    pub fn with_scaling(mut self, scaling: ScalingMethod) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_features<S: Into<String>>(mut self, features: impl IntoIterator<Item = S>) -> Self {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FingerprintConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Features used by the normalized and percentile encodings
    pub fn value_features(&self) -> Vec<String> {
        if self.features.is_empty() {
            self.quantiles.iter().map(|q| q.feature.clone()).collect()
        } else {
            self.features.clone()
        }
    }

    /// Validate the configuration
    /// - at least one quantile spec or one feature
    /// - every quantile level in [0, 1]
    /// - no feature listed twice
    pub fn validate(&self) -> Result<()> {
        if self.quantiles.is_empty() && self.features.is_empty() {
            return Err(Error::invalid("configuration names no features"));
        }
        for spec in &self.quantiles {
            spec.validate()?;
        }

        let mut seen = ahash::AHashSet::new();
        if let Some(dup) = self
            .quantiles
            .iter()
            .map(|q| q.feature.as_str())
            .find(|f| !seen.insert(*f))
        {
            return Err(Error::invalid(format!("feature '{}' has two quantile specs", dup)));
        }

        seen.clear();
        if let Some(dup) = self.features.iter().find(|f| !seen.insert(f.as_str())) {
            return Err(Error::invalid(format!("feature '{}' listed twice", dup)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = r#"{
            "quantiles": [
                {"feature": "AVG", "levels": [0.5, 0.75, 0.9]},
                {"feature": "K%", "levels": [0.5, 0.9], "lower_is_better": true}
            ],
            "scaling": "minmax"
        }"#;
        let config = FingerprintConfig::from_json(json).unwrap();

        assert_eq!(config.quantiles.len(), 2);
        assert!(!config.quantiles[0].lower_is_better);
        assert!(config.quantiles[1].lower_is_better);
        assert_eq!(config.scaling, ScalingMethod::Minmax);
        assert_eq!(config.value_features(), vec!["AVG", "K%"]);
    }

    #[test]
    fn test_default_scaling_is_zscore() {
        let config = FingerprintConfig::from_json(r#"{"features": ["HR"]}"#).unwrap();
        assert_eq!(config.scaling, ScalingMethod::Zscore);
        assert_eq!(config.value_features(), vec!["HR"]);
    }

    #[test]
    fn test_invalid_scaling_rejected() {
        let json = r#"{"features": ["HR"], "scaling": "robust"}"#;
        assert!(matches!(
            FingerprintConfig::from_json(json),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        assert!(FingerprintConfig::default().validate().is_err());

        let bad_level = FingerprintConfig::new(vec![QuantileSpec::new("AVG", vec![2.0])]);
        assert!(matches!(bad_level.validate(), Err(Error::InvalidArgument(_))));

        let dup = FingerprintConfig::new(vec![
            QuantileSpec::new("AVG", vec![0.5]),
            QuantileSpec::new("AVG", vec![0.9]),
        ]);
        assert!(dup.validate().is_err());

        let dup_features = FingerprintConfig::default().with_features(["HR", "HR"]);
        assert!(dup_features.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = FingerprintConfig::new(vec![QuantileSpec::new("HR", vec![0.25, 0.75])])
            .with_scaling(ScalingMethod::Minmax)
            .with_features(["HR", "AVG"]);
        let json = config.to_json().unwrap();
        assert_eq!(FingerprintConfig::from_json(&json).unwrap(), config);
    }
}
