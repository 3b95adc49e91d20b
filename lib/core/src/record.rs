//! Record and population access
//!
//! The encoders only need key-based lookup into one entity's features and
//! column access over a reference population. Both are expressed as traits
//! so any tabular backend can be plugged in.

use crate::error::{Error, Result};
use crate::feature_map::FeatureMap;
use ahash::AHashMap;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// One entity's features in a deterministic order
pub type Record = FeatureMap<f64>;

/// Key-based access to one entity's numeric features
///
/// `None` means the feature is absent. A present-but-missing value (a null
/// cell) is reported as `Some(f64::NAN)`; the encoders do not impute.
pub trait FeatureLookup {
    fn feature_value(&self, feature: &str) -> Option<f64>;

    /// Look up a feature or fail with [`Error::MissingFeature`]
    fn require(&self, feature: &str) -> Result<f64> {
        self.feature_value(feature)
            .ok_or_else(|| Error::missing_feature(feature))
    }
}

impl<T: FeatureLookup + ?Sized> FeatureLookup for &T {
    #[inline]
    fn feature_value(&self, feature: &str) -> Option<f64> {
        (**self).feature_value(feature)
    }
}

impl FeatureLookup for FeatureMap<f64> {
    #[inline]
    fn feature_value(&self, feature: &str) -> Option<f64> {
        self.get(feature).copied()
    }
}

impl<S: BuildHasher> FeatureLookup for HashMap<String, f64, S> {
    #[inline]
    fn feature_value(&self, feature: &str) -> Option<f64> {
        self.get(feature).copied()
    }
}

impl FeatureLookup for AHashMap<String, f64> {
    #[inline]
    fn feature_value(&self, feature: &str) -> Option<f64> {
        self.get(feature).copied()
    }
}

impl FeatureLookup for BTreeMap<String, f64> {
    #[inline]
    fn feature_value(&self, feature: &str) -> Option<f64> {
        self.get(feature).copied()
    }
}

/// JSON object payloads: numbers map to values, `null` to NaN
impl FeatureLookup for Value {
    fn feature_value(&self, feature: &str) -> Option<f64> {
        match self.get(feature)? {
            Value::Null => Some(f64::NAN),
            v => v.as_f64(),
        }
    }
}

/// Column access over a reference population
pub trait PopulationSource {
    /// All observed values of `feature`, one per member of the population
    fn column(&self, feature: &str) -> Result<Cow<'_, [f64]>>;

    /// Number of members, when cheaply known
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

impl<T: PopulationSource + ?Sized> PopulationSource for &T {
    fn column(&self, feature: &str) -> Result<Cow<'_, [f64]>> {
        (**self).column(feature)
    }

    fn size_hint(&self) -> Option<usize> {
        (**self).size_hint()
    }
}

impl<S: BuildHasher> PopulationSource for HashMap<String, Vec<f64>, S> {
    fn column(&self, feature: &str) -> Result<Cow<'_, [f64]>> {
        self.get(feature)
            .map(|values| Cow::Borrowed(values.as_slice()))
            .ok_or_else(|| Error::missing_feature(feature))
    }
}

impl PopulationSource for AHashMap<String, Vec<f64>> {
    fn column(&self, feature: &str) -> Result<Cow<'_, [f64]>> {
        self.get(feature)
            .map(|values| Cow::Borrowed(values.as_slice()))
            .ok_or_else(|| Error::missing_feature(feature))
    }
}

impl PopulationSource for BTreeMap<String, Vec<f64>> {
    fn column(&self, feature: &str) -> Result<Cow<'_, [f64]>> {
        self.get(feature)
            .map(|values| Cow::Borrowed(values.as_slice()))
            .ok_or_else(|| Error::missing_feature(feature))
    }
}

impl PopulationSource for FeatureMap<Vec<f64>> {
    fn column(&self, feature: &str) -> Result<Cow<'_, [f64]>> {
        self.get(feature)
            .map(|values| Cow::Borrowed(values.as_slice()))
            .ok_or_else(|| Error::missing_feature(feature))
    }

    fn size_hint(&self) -> Option<usize> {
        self.values().first().map(Vec::len)
    }
}

/// Row-oriented populations: every row must carry the feature
impl<R: FeatureLookup> PopulationSource for [R] {
    fn column(&self, feature: &str) -> Result<Cow<'_, [f64]>> {
        self.iter()
            .map(|row| row.require(feature))
            .collect::<Result<Vec<f64>>>()
            .map(Cow::Owned)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<R: FeatureLookup> PopulationSource for Vec<R> {
    fn column(&self, feature: &str) -> Result<Cow<'_, [f64]>> {
        self.as_slice().column(feature)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// JSON object of arrays, e.g. `{"AVG": [0.25, 0.31], "HR": [120, 340]}`
impl PopulationSource for Value {
    fn column(&self, feature: &str) -> Result<Cow<'_, [f64]>> {
        let cells = self
            .get(feature)
            .ok_or_else(|| Error::missing_feature(feature))?
            .as_array()
            .ok_or_else(|| Error::invalid(format!("column '{}' is not an array", feature)))?;

        cells
            .iter()
            .map(|cell| match cell {
                Value::Null => Ok(f64::NAN),
                v => v.as_f64().ok_or_else(|| {
                    Error::invalid(format!("column '{}' holds a non-numeric value", feature))
                }),
            })
            .collect::<Result<Vec<f64>>>()
            .map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_lookup() {
        let row = json!({"AVG": 0.298, "HR": 250, "TEAM": "NYY", "WAR": null});
        assert_eq!(row.feature_value("AVG"), Some(0.298));
        assert_eq!(row.feature_value("HR"), Some(250.0));
        assert_eq!(row.feature_value("TEAM"), None);
        assert!(row.feature_value("WAR").unwrap().is_nan());
        assert_eq!(row.require("OPS"), Err(Error::MissingFeature("OPS".to_string())));
    }

    #[test]
    fn test_row_population_column() {
        let rows: Vec<Record> = vec![
            [("AVG", 0.2), ("HR", 10.0)].into(),
            [("AVG", 0.3), ("HR", 20.0)].into(),
        ];
        assert_eq!(rows.column("HR").unwrap().as_ref(), &[10.0, 20.0]);
        assert_eq!(rows.size_hint(), Some(2));
    }

    #[test]
    fn test_row_population_missing_feature() {
        let rows: Vec<Record> = vec![
            [("AVG", 0.2)].into(),
            [("AVG", 0.3), ("HR", 20.0)].into(),
        ];
        assert!(matches!(rows.column("HR"), Err(Error::MissingFeature(_))));
    }

    #[test]
    fn test_json_population_column() {
        let population = json!({"AVG": [0.2, null, 0.4], "TEAM": ["a", "b"]});
        let avg = population.column("AVG").unwrap();
        assert_eq!(avg.len(), 3);
        assert!(avg[1].is_nan());
        assert!(matches!(population.column("TEAM"), Err(Error::InvalidArgument(_))));
        assert!(matches!(population.column("HR"), Err(Error::MissingFeature(_))));
    }

    #[test]
    fn test_column_map_population() {
        let mut population: HashMap<String, Vec<f64>> = HashMap::new();
        population.insert("HR".to_string(), vec![100.0, 200.0]);
        assert_eq!(population.column("HR").unwrap().as_ref(), &[100.0, 200.0]);
    }
}
