/// Percentile with linear interpolation between closest ranks, over an ascending,
/// non-empty slice.
///
/// For `h = (n - 1) * pct / 100` the result is
/// `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`. This matches the
/// "linear" method (Hyndman-Fan type 7) and is pinned so replays are reproducible.
/// `pct` is clamped to `[0, 100]`.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let n = sorted.len();
    let h = (n - 1) as f64 * pct.clamp(0.0, 100.0) / 100.0;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percentile(values: &[f64], pct: f64) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(percentile_sorted(&sorted, pct))
    }

    fn one_to_hundred() -> Vec<f64> {
        (1..=100).map(f64::from).collect()
    }

    #[test]
    fn interpolates_between_ranks() {
        let xs = one_to_hundred();
        assert!((percentile(&xs, 90.0).unwrap() - 90.1).abs() < 1e-9);
        assert!((percentile(&xs, 80.0).unwrap() - 80.2).abs() < 1e-9);
        assert!((percentile(&xs, 10.0).unwrap() - 10.9).abs() < 1e-9);
        assert!((percentile(&xs, 50.0).unwrap() - 50.5).abs() < 1e-9);
    }

    #[test]
    fn endpoints_are_min_and_max() {
        let xs = vec![7.0, -2.0, 3.5];
        assert_eq!(percentile(&xs, 0.0), Some(-2.0));
        assert_eq!(percentile(&xs, 100.0), Some(7.0));
    }

    #[test]
    fn unsorted_input_is_handled() {
        let xs = vec![4.0, 1.0, 3.0, 2.0];
        // h = 3 * 0.5 = 1.5 -> 2.0 + 0.5 * (3.0 - 2.0)
        assert!((percentile(&xs, 50.0).unwrap() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn sorted_slice_is_read_directly() {
        let sorted = [1.0, 2.0, 4.0, 8.0];
        // h = 3 * 0.9 = 2.7 -> 4.0 + 0.7 * (8.0 - 4.0)
        assert!((percentile_sorted(&sorted, 90.0) - 6.8).abs() < 1e-9);
        assert_eq!(percentile_sorted(&sorted, 250.0), 8.0);
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[42.0], 90.0), Some(42.0));
    }
}
