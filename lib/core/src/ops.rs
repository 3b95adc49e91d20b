// Numeric kernels shared by the preprocessor and encoders.
// Distance loops use two accumulators for better pipelining; callers are
// responsible for checking that paired slices have equal length.

use ordered_float::OrderedFloat;

/// Euclidean (L2) distance
#[inline]
pub fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum0 = 0.0f64;
    let mut sum1 = 0.0f64;

    let chunks = a.chunks_exact(4);
    let remainder = chunks.remainder();
    let b_chunks = b.chunks_exact(4);

    for (a_chunk, b_chunk) in chunks.zip(b_chunks) {
        let d0 = a_chunk[0] - b_chunk[0];
        let d1 = a_chunk[1] - b_chunk[1];
        let d2 = a_chunk[2] - b_chunk[2];
        let d3 = a_chunk[3] - b_chunk[3];

        sum0 += d0 * d0 + d1 * d1;
        sum1 += d2 * d2 + d3 * d3;
    }

    for i in (a.len() - remainder.len())..a.len() {
        let diff = a[i] - b[i];
        sum0 += diff * diff;
    }

    (sum0 + sum1).sqrt()
}

/// Copy of `values` with NaNs dropped, sorted ascending
pub fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_unstable_by_key(|v| OrderedFloat(*v));
    sorted
}

/// Quantile of an ascending slice using linear interpolation between the
/// two closest ranks. `None` for an empty slice or a level outside [0, 1].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }
    let last = sorted.len().checked_sub(1)?;
    let h = last as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(last);
    let frac = h - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// (min, max) ignoring NaNs; `None` when nothing is left
pub fn nan_min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// (mean, population standard deviation) ignoring NaNs; `None` when nothing
/// is left
pub fn nan_mean_std(values: &[f64]) -> Option<(f64, f64)> {
    let (count, sum) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0usize, 0.0f64), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;
    let var = values
        .iter()
        .filter(|v| !v.is_nan())
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / count as f64;
    Some((mean, var.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_distance() {
        assert!((l2_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert!((l2_distance(&[0.0; 6], &[1.0; 6]) - 6.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [0.200, 0.250, 0.300, 0.350];
        assert!((quantile_sorted(&sorted, 0.25).unwrap() - 0.2375).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.5).unwrap() - 0.275).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.75).unwrap() - 0.3125).abs() < 1e-12);
        assert_eq!(quantile_sorted(&sorted, 0.0), Some(0.200));
        assert_eq!(quantile_sorted(&sorted, 1.0), Some(0.350));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_quantile_level_out_of_range() {
        let sorted = [1.0, 2.0, 3.0];
        assert_eq!(quantile_sorted(&sorted, 2.0), None);
        assert_eq!(quantile_sorted(&sorted, -0.1), None);
        assert_eq!(quantile_sorted(&sorted, f64::NAN), None);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile_sorted(&[7.0], 0.9), Some(7.0));
    }

    #[test]
    fn test_sorted_finite_drops_nan() {
        assert_eq!(sorted_finite(&[3.0, f64::NAN, 1.0, 2.0]), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_nan_aware_summaries() {
        let values = [100.0, f64::NAN, 200.0, 300.0, 400.0];
        assert_eq!(nan_min_max(&values), Some((100.0, 400.0)));

        let (mean, std) = nan_mean_std(&values).unwrap();
        assert!((mean - 250.0).abs() < 1e-12);
        assert!((std - 12500.0f64.sqrt()).abs() < 1e-9);

        assert_eq!(nan_min_max(&[f64::NAN]), None);
        assert_eq!(nan_mean_std(&[]), None);
    }
}
