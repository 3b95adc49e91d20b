//! Fingerprint scoring
//!
//! Set-overlap and geometric comparisons between two fingerprints of equal
//! length. Every scorer accepts any numeric element type that widens to
//! `f64`, so bit fingerprints (`u8`) and real-valued ones (`f64`) share the
//! same functions.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statprint_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[inline]
fn widen<T: Into<f64>>(x: T) -> f64 {
    x.into()
}

fn check_dims(v1: usize, v2: usize) -> Result<()> {
    if v1 == v2 {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            expected: v1,
            actual: v2,
        })
    }
}

/// Tanimoto coefficient of two fingerprints
///
/// Any non-zero element counts as a set bit. Returns `|v1 AND v2| / |v1 OR v2|`,
/// or `0.0` when both fingerprints are all zero.
pub fn tanimoto<T>(v1: &[T], v2: &[T]) -> Result<f64>
where
    T: Copy + Into<f64>,
{
    check_dims(v1.len(), v2.len())?;

    let (common, union) = v1
        .iter()
        .zip(v2.iter())
        .fold((0usize, 0usize), |(common, union), (&a, &b)| {
            let a = widen(a) != 0.0;
            let b = widen(b) != 0.0;
            (common + usize::from(a && b), union + usize::from(a || b))
        });

    if union == 0 {
        Ok(0.0)
    } else {
        Ok(common as f64 / union as f64)
    }
}

/// Jaccard index of two fingerprints; the same measure as [`tanimoto`]
#[inline]
pub fn jaccard<T>(v1: &[T], v2: &[T]) -> Result<f64>
where
    T: Copy + Into<f64>,
{
    tanimoto(v1, v2)
}

/// Sum of absolute elementwise differences
pub fn manhattan<T>(v1: &[T], v2: &[T]) -> Result<f64>
where
    T: Copy + Into<f64>,
{
    check_dims(v1.len(), v2.len())?;
    Ok(v1
        .iter()
        .zip(v2.iter())
        .map(|(&a, &b)| (widen(a) - widen(b)).abs())
        .sum())
}

/// Cosine similarity
///
/// Returns `0.0` when either fingerprint has zero length (norm), matching
/// the "no overlap" result of [`tanimoto`] for empty fingerprints.
pub fn cosine_sim<T>(v1: &[T], v2: &[T]) -> Result<f64>
where
    T: Copy + Into<f64>,
{
    check_dims(v1.len(), v2.len())?;

    let (dot, norm1, norm2) = v1.iter().zip(v2.iter()).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, n1, n2), (&a, &b)| {
            let (a, b) = (widen(a), widen(b));
            (dot + a * b, n1 + a * a, n2 + b * b)
        },
    );

    if norm1 == 0.0 || norm2 == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm1.sqrt() * norm2.sqrt()))
}

/// Scoring function selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Jaccard,
    Tanimoto,
    Manhattan,
    Cosine,
}

impl Metric {
    pub fn score<T>(&self, v1: &[T], v2: &[T]) -> Result<f64>
    where
        T: Copy + Into<f64>,
    {
        match self {
            Metric::Jaccard => jaccard(v1, v2),
            Metric::Tanimoto => tanimoto(v1, v2),
            Metric::Manhattan => manhattan(v1, v2),
            Metric::Cosine => cosine_sim(v1, v2),
        }
    }

    /// Lower is closer for distances, higher is closer for similarities
    pub fn is_distance(&self) -> bool {
        matches!(self, Metric::Manhattan)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Jaccard => "jaccard",
            Metric::Tanimoto => "tanimoto",
            Metric::Manhattan => "manhattan",
            Metric::Cosine => "cosine",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jaccard" => Ok(Metric::Jaccard),
            "tanimoto" => Ok(Metric::Tanimoto),
            "manhattan" => Ok(Metric::Manhattan),
            "cosine" => Ok(Metric::Cosine),
            other => Err(Error::invalid(format!("unknown metric '{}'", other))),
        }
    }
}

/// Score of one pair in a batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairScore {
    pub left: usize,
    pub right: usize,
    pub score: f64,
}

/// Score every unordered pair `(i, j)` with `i < j`, in parallel
///
/// Results come back in row-major order of the upper triangle.
pub fn pairwise<T>(fingerprints: &[Vec<T>], metric: Metric) -> Result<Vec<PairScore>>
where
    T: Copy + Into<f64> + Sync,
{
    let n = fingerprints.len();
    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            (i + 1..n).map(move |j| {
                metric
                    .score(&fingerprints[i], &fingerprints[j])
                    .map(|score| PairScore { left: i, right: j, score })
            })
        })
        .collect()
}

/// Rank candidates against a query, closest first
///
/// Returns `(candidate index, score)` pairs; at most `limit` entries when
/// given. Ties keep candidate order.
pub fn rank<T>(
    query: &[T],
    candidates: &[Vec<T>],
    metric: Metric,
    limit: Option<usize>,
) -> Result<Vec<(usize, f64)>>
where
    T: Copy + Into<f64>,
{
    let mut results = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| metric.score(query, candidate).map(|s| (i, s)))
        .collect::<Result<Vec<_>>>()?;

    if metric.is_distance() {
        results.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    } else {
        results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    }

    if let Some(limit) = limit {
        results.truncate(limit);
    }
    Ok(results)
}
