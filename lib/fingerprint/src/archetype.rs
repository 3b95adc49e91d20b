//! Archetype distance encoding
//!
//! An archetype is a labelled centroid in feature space, usually produced
//! by clustering a reference population outside this crate. A record's
//! archetype fingerprint is its Euclidean distance to every centroid, in the
//! archetype set's defined order.

use statprint_core::ops::l2_distance;
use statprint_core::{Error, FeatureLookup, FeatureMap, Record, Result};
use tracing::trace;

/// Borrowed view of one centroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid<'a> {
    pub label: &'a str,
    pub features: &'a [String],
    pub values: &'a [f64],
}

/// An ordered collection of named centroids
///
/// Implemented for a label→centroid mapping ([`FeatureMap<Record>`]), a list
/// of `(label, centroid)` pairs and an indexed [`ArchetypeTable`]; all of
/// them give identical fingerprints for identical centroids.
pub trait ArchetypeSource {
    fn centroids(&self) -> Vec<Centroid<'_>>;
}

impl<T: ArchetypeSource + ?Sized> ArchetypeSource for &T {
    fn centroids(&self) -> Vec<Centroid<'_>> {
        (**self).centroids()
    }
}

impl ArchetypeSource for FeatureMap<Record> {
    fn centroids(&self) -> Vec<Centroid<'_>> {
        self.iter()
            .map(|(label, centroid)| Centroid {
                label,
                features: centroid.names(),
                values: centroid.values(),
            })
            .collect()
    }
}

impl ArchetypeSource for [(String, Record)] {
    fn centroids(&self) -> Vec<Centroid<'_>> {
        self.iter()
            .map(|(label, centroid)| Centroid {
                label: label.as_str(),
                features: centroid.names(),
                values: centroid.values(),
            })
            .collect()
    }
}

impl ArchetypeSource for Vec<(String, Record)> {
    fn centroids(&self) -> Vec<Centroid<'_>> {
        self.as_slice().centroids()
    }
}

/// Centroid matrix with one row per archetype and one column per feature,
/// as produced by a clustering routine
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeTable {
    features: Vec<String>,
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ArchetypeTable {
    /// Build a table from column names, row labels and rows
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when labels and rows disagree in count, a
    /// row's width differs from the number of features, or a label repeats
    pub fn new(features: Vec<String>, labels: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if labels.len() != rows.len() {
            return Err(Error::invalid(format!(
                "archetype table has {} labels but {} rows",
                labels.len(),
                rows.len()
            )));
        }
        if let Some((label, row)) = labels
            .iter()
            .zip(rows.iter())
            .find(|(_, row)| row.len() != features.len())
        {
            return Err(Error::invalid(format!(
                "archetype '{}' has {} values, expected {}",
                label,
                row.len(),
                features.len()
            )));
        }
        let mut seen = ahash::AHashSet::with_capacity(labels.len());
        if let Some(dup) = labels.iter().find(|label| !seen.insert(label.as_str())) {
            return Err(Error::invalid(format!("duplicate archetype label '{}'", dup)));
        }
        Ok(Self { features, labels, rows })
    }

    /// Label rows `Archetype_0`, `Archetype_1`, ... in row order
    pub fn with_default_labels(features: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let labels = (0..rows.len()).map(|i| format!("Archetype_{}", i)).collect();
        Self::new(features, labels, rows)
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Centroid row for a label
    pub fn row(&self, label: &str) -> Option<&[f64]> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.rows[i].as_slice())
    }
}

impl ArchetypeSource for ArchetypeTable {
    fn centroids(&self) -> Vec<Centroid<'_>> {
        self.labels
            .iter()
            .zip(self.rows.iter())
            .map(|(label, row)| Centroid {
                label: label.as_str(),
                features: self.features.as_slice(),
                values: row.as_slice(),
            })
            .collect()
    }
}

/// Euclidean distance from the record to each archetype centroid
///
/// Distances are taken over each centroid's own feature set and returned in
/// archetype order.
///
/// # Errors
/// [`Error::MissingFeature`] if the record lacks a centroid feature
pub fn archetypefp<R, A>(record: &R, archetypes: &A) -> Result<Vec<f64>>
where
    R: FeatureLookup + ?Sized,
    A: ArchetypeSource + ?Sized,
{
    let centroids = archetypes.centroids();
    let mut point = Vec::new();
    let mut fp = Vec::with_capacity(centroids.len());

    for centroid in &centroids {
        point.clear();
        for feature in centroid.features {
            point.push(record.require(feature)?);
        }
        fp.push(l2_distance(&point, centroid.values));
    }

    trace!(archetypes = fp.len(), "encoded archetype fingerprint");
    Ok(fp)
}
