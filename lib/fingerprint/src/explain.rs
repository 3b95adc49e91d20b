//! Explainability for threshold fingerprints
//!
//! Names every bit of a binary or binned fingerprint and breaks an overlap
//! score down into the thresholds two records share.

use crate::scoring::tanimoto;
use crate::stats::{QuantileSpec, Thresholds};
use serde::Serialize;
use statprint_core::{Error, Result};

/// One label per bit, `"<feature>>=<threshold>"`, in fingerprint order
pub fn bit_labels(thresholds: &Thresholds) -> Vec<String> {
    thresholds
        .iter()
        .flat_map(|(feature, quants)| quants.iter().map(move |t| format!("{}>={}", feature, t)))
        .collect()
}

/// One label per bit named after the quantile level, `"AVG>75"` for the
/// 75th percentile of AVG. Lower-is-better features are named after the
/// level actually evaluated (`"K%>25"` for a requested 0.75), in the
/// ascending order of [`QuantileSpec::effective_levels`].
pub fn level_labels(specs: &[QuantileSpec]) -> Vec<String> {
    specs
        .iter()
        .flat_map(|spec| {
            spec.effective_levels()
                .into_iter()
                .map(move |q| format!("{}>{}", spec.feature, (q * 100.0).round() as i64))
        })
        .collect()
}

/// Breakdown of the overlap between two bit fingerprints
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OverlapExplanation {
    /// Tanimoto score of the pair
    pub score: f64,
    /// Bits set in both fingerprints
    pub shared: Vec<String>,
    /// Bits set only in the left fingerprint
    pub left_only: Vec<String>,
    /// Bits set only in the right fingerprint
    pub right_only: Vec<String>,
}

impl OverlapExplanation {
    /// Label of the first shared bit, if any
    pub fn top_shared(&self) -> Option<&str> {
        self.shared.first().map(String::as_str)
    }
}

/// Explain the overlap of two fingerprints using bit labels from
/// [`bit_labels`] or [`level_labels`]
///
/// # Errors
/// [`Error::DimensionMismatch`] if the labels and fingerprints disagree in length
pub fn explain_overlap(labels: &[String], v1: &[u8], v2: &[u8]) -> Result<OverlapExplanation> {
    for fp in [v1, v2] {
        if fp.len() != labels.len() {
            return Err(Error::DimensionMismatch {
                expected: labels.len(),
                actual: fp.len(),
            });
        }
    }

    let mut explanation = OverlapExplanation {
        score: tanimoto(v1, v2)?,
        shared: Vec::new(),
        left_only: Vec::new(),
        right_only: Vec::new(),
    };

    for ((label, &a), &b) in labels.iter().zip(v1).zip(v2) {
        match (a != 0, b != 0) {
            (true, true) => explanation.shared.push(label.clone()),
            (true, false) => explanation.left_only.push(label.clone()),
            (false, true) => explanation.right_only.push(label.clone()),
            (false, false) => {}
        }
    }

    Ok(explanation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds {
        [("AVG", vec![0.25, 0.3]), ("HR", vec![200.0])].into()
    }

    #[test]
    fn test_bit_labels() {
        assert_eq!(bit_labels(&thresholds()), vec!["AVG>=0.25", "AVG>=0.3", "HR>=200"]);
    }

    #[test]
    fn test_level_labels() {
        let specs = vec![
            QuantileSpec::new("AVG", vec![0.5, 0.9]),
            QuantileSpec::lower_is_better("K%", vec![0.75, 0.9]),
        ];
        assert_eq!(level_labels(&specs), vec!["AVG>50", "AVG>90", "K%>10", "K%>25"]);
    }

    #[test]
    fn test_explain_overlap() {
        let labels = bit_labels(&thresholds());
        let explanation = explain_overlap(&labels, &[1, 1, 0], &[1, 0, 1]).unwrap();

        assert!((explanation.score - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(explanation.shared, vec!["AVG>=0.25"]);
        assert_eq!(explanation.left_only, vec!["AVG>=0.3"]);
        assert_eq!(explanation.right_only, vec!["HR>=200"]);
        assert_eq!(explanation.top_shared(), Some("AVG>=0.25"));
    }

    #[test]
    fn test_explain_overlap_length_mismatch() {
        let labels = bit_labels(&thresholds());
        assert!(matches!(
            explain_overlap(&labels, &[1, 1], &[1, 0]),
            Err(Error::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_explanation_serializes() {
        let labels = bit_labels(&thresholds());
        let explanation = explain_overlap(&labels, &[0, 0, 1], &[0, 0, 1]).unwrap();
        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["score"], 1.0);
        assert_eq!(json["shared"][0], "HR>=200");
    }
}
