//! Score normalisation helpers shared by the scoring stages.

/// Min-max normalisation within a given range [min_val, max_val], clamped to [0, 1].
pub fn minmax_normalise(value: f64, min_val: f64, max_val: f64) -> f64 {
    if (max_val - min_val).abs() < 1e-10 || max_val < min_val {
        return 0.5; // degenerate range
    }
    ((value - min_val) / (max_val - min_val)).clamp(0.0, 1.0)
}

/// Clamp a sub-score into [0, 100].
///
/// Non-finite inputs never reach a blend: +inf maps to 100, -inf and NaN to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Safe ratio that yields 0 for an empty or non-positive denominator.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minmax_midpoint() {
        assert!((minmax_normalise(0.0, -2.0, 2.0) - 0.5).abs() < 1e-6);
        assert!((minmax_normalise(5.0, -2.0, 2.0) - 1.0).abs() < 1e-6);
        assert!((minmax_normalise(-5.0, -2.0, 2.0) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_minmax_degenerate_range() {
        assert_eq!(minmax_normalise(1.0, 2.0, 2.0), 0.5);
        assert_eq!(minmax_normalise(1.0, 2.0, -2.0), 0.5);
    }

    #[test]
    fn test_clamp_score_non_finite() {
        assert_eq!(clamp_score(f64::INFINITY), 100.0);
        assert_eq!(clamp_score(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }

    #[test]
    fn test_ratio_or_zero() {
        assert_eq!(ratio_or_zero(10.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(10.0, 4.0), 2.5);
    }
}
