//! Reference population preprocessing
//!
//! Computes the per-feature statistics the encoders consume. Runs once per
//! reference population; the results are plain values that can be shared
//! across threads and reused for every record.

use crate::stats::{check_level, QuantileSpec, References, ScalingMethod, Scaling, Thresholds};
use statprint_core::ops::{nan_mean_std, nan_min_max, quantile_sorted, sorted_finite};
use statprint_core::{Error, FeatureMap, PopulationSource, Result};
use tracing::debug;

/// Compute quantile thresholds for each requested feature
///
/// `levels` maps a feature to the quantile levels wanted for it; thresholds
/// are returned in the same feature order and the same level order. Values
/// are interpolated linearly between the two nearest ranks. NaN cells are
/// ignored.
///
/// # Errors
/// * [`Error::NotComputable`] if a feature has no observed values
/// * [`Error::InvalidArgument`] if a level is outside [0, 1]
/// * [`Error::MissingFeature`] if the population lacks a feature
pub fn generate_quantiles<P>(population: &P, levels: &FeatureMap<Vec<f64>>) -> Result<Thresholds>
where
    P: PopulationSource + ?Sized,
{
    let thresholds = levels.try_map_values(|feature, qs| quantiles_for(population, feature, qs))?;

    debug!(
        features = thresholds.len(),
        population = ?population.size_hint(),
        "generated quantile thresholds"
    );
    Ok(thresholds)
}

/// Same as [`generate_quantiles`] driven by [`QuantileSpec`]s, honouring
/// `lower_is_better`
pub fn generate_quantiles_from_specs<P>(population: &P, specs: &[QuantileSpec]) -> Result<Thresholds>
where
    P: PopulationSource + ?Sized,
{
    let mut thresholds = Thresholds::with_capacity(specs.len());
    for spec in specs {
        spec.validate()?;
        let quants = quantiles_for(population, &spec.feature, &spec.effective_levels())?;
        thresholds.insert(spec.feature.clone(), quants);
    }

    debug!(
        features = thresholds.len(),
        population = ?population.size_hint(),
        "generated quantile thresholds from specs"
    );
    Ok(thresholds)
}

fn quantiles_for<P>(population: &P, feature: &str, levels: &[f64]) -> Result<Vec<f64>>
where
    P: PopulationSource + ?Sized,
{
    let column = population.column(feature)?;
    let sorted = sorted_finite(&column);

    levels
        .iter()
        .map(|&q| {
            check_level(feature, q)?;
            quantile_sorted(&sorted, q).ok_or_else(|| {
                Error::not_computable(format!("quantile of empty values for feature '{}'", feature))
            })
        })
        .collect()
}

/// Compute scaling parameters for each feature, ignoring NaNs
///
/// * `Minmax` yields `(min, max)`
/// * `Zscore` yields `(mean, std)` with the population (N) divisor
///
/// # Errors
/// * [`Error::NotComputable`] if a feature has no observed values
/// * [`Error::MissingFeature`] if the population lacks a feature
pub fn feature_scaling<P, S>(population: &P, features: &[S], method: ScalingMethod) -> Result<Scaling>
where
    P: PopulationSource + ?Sized,
    S: AsRef<str>,
{
    let mut scaling = Scaling::with_capacity(features.len());
    for feature in features {
        let feature = feature.as_ref();
        let column = population.column(feature)?;
        let params = match method {
            ScalingMethod::Minmax => nan_min_max(&column),
            ScalingMethod::Zscore => nan_mean_std(&column),
        }
        .ok_or_else(|| {
            Error::not_computable(format!(
                "{} scaling of empty values for feature '{}'",
                method, feature
            ))
        })?;
        scaling.insert(feature, params);
    }

    debug!(features = scaling.len(), %method, "computed feature scaling");
    Ok(scaling)
}

/// Collect the full reference distribution of each feature for percentile
/// encoding. NaN cells are dropped.
///
/// # Errors
/// * [`Error::NotComputable`] if a feature has no observed values
/// * [`Error::MissingFeature`] if the population lacks a feature
pub fn reference_distributions<P, S>(population: &P, features: &[S]) -> Result<References>
where
    P: PopulationSource + ?Sized,
    S: AsRef<str>,
{
    let mut references = References::with_capacity(features.len());
    for feature in features {
        let feature = feature.as_ref();
        let observed: Vec<f64> = population
            .column(feature)?
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();
        if observed.is_empty() {
            return Err(Error::not_computable(format!(
                "no reference values for feature '{}'",
                feature
            )));
        }
        references.insert(feature, observed);
    }
    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn population() -> HashMap<String, Vec<f64>> {
        let mut data = HashMap::new();
        data.insert("AVG".to_string(), vec![0.200, 0.250, 0.300, 0.350]);
        data.insert("HR".to_string(), vec![100.0, 200.0, 300.0, 400.0]);
        data
    }

    #[test]
    fn test_generate_quantiles_basic() {
        let levels: FeatureMap<Vec<f64>> = [("AVG", vec![0.25, 0.5, 0.75])].into();
        let result = generate_quantiles(&population(), &levels).unwrap();

        let avg = result.get("AVG").unwrap();
        let expected = [0.2375, 0.275, 0.3125];
        for (got, want) in avg.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "{} != {}", got, want);
        }
    }

    #[test]
    fn test_generate_quantiles_preserves_request_order() {
        let levels: FeatureMap<Vec<f64>> = [("HR", vec![0.5]), ("AVG", vec![1.0, 0.0])].into();
        let result = generate_quantiles(&population(), &levels).unwrap();

        assert_eq!(result.names(), &["HR", "AVG"]);
        assert_eq!(result.get("AVG").unwrap(), &vec![0.350, 0.200]);
    }

    #[test]
    fn test_generate_quantiles_empty() {
        let mut data: HashMap<String, Vec<f64>> = HashMap::new();
        data.insert("AVG".to_string(), vec![]);
        let levels: FeatureMap<Vec<f64>> = [("AVG", vec![0.5])].into();

        assert!(matches!(
            generate_quantiles(&data, &levels),
            Err(Error::NotComputable(_))
        ));
    }

    #[test]
    fn test_generate_quantiles_bad_level() {
        let levels: FeatureMap<Vec<f64>> = [("AVG", vec![1.25])].into();
        assert!(matches!(
            generate_quantiles(&population(), &levels),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_generate_quantiles_missing_feature() {
        let levels: FeatureMap<Vec<f64>> = [("OPS", vec![0.5])].into();
        assert!(matches!(
            generate_quantiles(&population(), &levels),
            Err(Error::MissingFeature(_))
        ));
    }

    #[test]
    fn test_quantiles_from_specs_lower_is_better() {
        let specs = vec![
            QuantileSpec::new("HR", vec![0.5]),
            QuantileSpec::lower_is_better("AVG", vec![0.75]),
        ];
        let result = generate_quantiles_from_specs(&population(), &specs).unwrap();

        assert_eq!(result.get("HR").unwrap(), &vec![250.0]);
        // 0.75 inverted to the 25th percentile
        assert!((result.get("AVG").unwrap()[0] - 0.2375).abs() < 1e-12);
    }

    #[test]
    fn test_feature_scaling_minmax() {
        let mut data: HashMap<String, Vec<f64>> = HashMap::new();
        data.insert("AVG".to_string(), vec![0.200, 0.300, 0.400]);

        let result = feature_scaling(&data, &["AVG"], ScalingMethod::Minmax).unwrap();
        assert_eq!(result.get("AVG"), Some(&(0.200, 0.400)));
    }

    #[test]
    fn test_feature_scaling_zscore() {
        let result = feature_scaling(&population(), &["HR"], ScalingMethod::Zscore).unwrap();
        let (mean, std) = *result.get("HR").unwrap();
        assert!((mean - 250.0).abs() < 1e-9);
        assert!((std - 111.803_398_874_989_48).abs() < 1e-9);
    }

    #[test]
    fn test_feature_scaling_ignores_nan() {
        let mut data: HashMap<String, Vec<f64>> = HashMap::new();
        data.insert("OPS".to_string(), vec![0.8, f64::NAN, 1.0]);

        let result = feature_scaling(&data, &["OPS"], ScalingMethod::Minmax).unwrap();
        assert_eq!(result.get("OPS"), Some(&(0.8, 1.0)));

        let result = feature_scaling(&data, &["OPS"], ScalingMethod::Zscore).unwrap();
        let (mean, std) = *result.get("OPS").unwrap();
        assert!((mean - 0.9).abs() < 1e-12);
        assert!((std - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_feature_scaling_all_nan() {
        let mut data: HashMap<String, Vec<f64>> = HashMap::new();
        data.insert("OPS".to_string(), vec![f64::NAN]);
        assert!(matches!(
            feature_scaling(&data, &["OPS"], ScalingMethod::Minmax),
            Err(Error::NotComputable(_))
        ));
    }

    #[test]
    fn test_reference_distributions() {
        let mut data: HashMap<String, Vec<f64>> = HashMap::new();
        data.insert("HR".to_string(), vec![10.0, f64::NAN, 30.0]);
        data.insert("SB".to_string(), vec![f64::NAN]);

        let refs = reference_distributions(&data, &["HR"]).unwrap();
        assert_eq!(refs.get("HR").unwrap(), &vec![10.0, 30.0]);

        assert!(matches!(
            reference_distributions(&data, &["SB"]),
            Err(Error::NotComputable(_))
        ));
    }
}
