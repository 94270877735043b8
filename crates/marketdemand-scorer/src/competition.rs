//! Competition density scoring.
//!
//! Real people-per-business (PPB) is compared to the industry's ideal PPB on a
//! log2 scale: +1 means half the ideal number of competitors, -1 twice as many.

use crate::normalise::minmax_normalise;

/// Log score returned when the ratio collapses to zero (people but no room, or no people at all).
pub const EXTREME_CROWDING: f64 = -10.0;

/// Default clamp bounds for the log score: two doublings either way.
pub const DEFAULT_LOW: f64 = -2.0;
pub const DEFAULT_HIGH: f64 = 2.0;

/// Population per business. `+inf` when there are no competitors.
pub fn calculate_real_ppb(population: u64, business_count: usize) -> f64 {
    if business_count == 0 {
        return f64::INFINITY;
    }
    population as f64 / business_count as f64
}

/// log2(real_ppb / ideal_ppb).
///
/// Positive means the market is more open than ideal, negative means
/// saturated. `+inf` when the industry has no ideal density;
/// [`EXTREME_CROWDING`] when the ratio is not positive.
pub fn calculate_competition_score(real_ppb: f64, ideal_ppb: f64) -> f64 {
    if ideal_ppb == 0.0 {
        return f64::INFINITY;
    }
    let ratio = real_ppb / ideal_ppb;
    if ratio <= 0.0 || ratio.is_nan() {
        return EXTREME_CROWDING;
    }
    ratio.log2()
}

/// Map a log competition score onto [0, 100].
///
/// `+inf` is intercepted first and maps to 100. Anything else is clamped to
/// `[low, high]` and rescaled linearly; values beyond the bounds are
/// compressed onto them, not extrapolated.
pub fn normalize_competition_to_0_100(log_score: f64, low: f64, high: f64) -> f64 {
    if log_score == f64::INFINITY {
        return 100.0;
    }
    if log_score.is_nan() {
        return 0.0;
    }
    minmax_normalise(log_score.clamp(low.min(high), high.max(low)), low, high) * 100.0
}

/// [`normalize_competition_to_0_100`] with the default ±2 bounds.
pub fn normalize_competition(log_score: f64) -> f64 {
    normalize_competition_to_0_100(log_score, DEFAULT_LOW, DEFAULT_HIGH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_ppb_zero_businesses_is_infinite() {
        assert_eq!(calculate_real_ppb(100_000, 0), f64::INFINITY);
        assert_eq!(calculate_real_ppb(100_000, 10), 10_000.0);
    }

    #[test]
    fn test_competition_score_log2() {
        assert!((calculate_competition_score(10_000.0, 5_000.0) - 1.0).abs() < 1e-12);
        assert!((calculate_competition_score(2_500.0, 5_000.0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_competition_score_sentinels() {
        assert_eq!(calculate_competition_score(10_000.0, 0.0), f64::INFINITY);
        assert_eq!(calculate_competition_score(0.0, 5_000.0), EXTREME_CROWDING);
        assert_eq!(calculate_competition_score(f64::INFINITY, 5_000.0), f64::INFINITY);
    }

    #[test]
    fn test_normalize_infinity_is_100() {
        assert_eq!(normalize_competition(f64::INFINITY), 100.0);
    }

    #[test]
    fn test_normalize_linear_and_clamped() {
        assert!((normalize_competition(1.0) - 75.0).abs() < 1e-9);
        assert!((normalize_competition(0.0) - 50.0).abs() < 1e-9);
        assert_eq!(normalize_competition(EXTREME_CROWDING), 0.0);
        assert_eq!(normalize_competition(7.5), 100.0);
    }

    #[test]
    fn test_normalize_custom_bounds() {
        // ±1 doubling: a score of 0.5 sits three quarters of the way up
        assert!((normalize_competition_to_0_100(0.5, -1.0, 1.0) - 75.0).abs() < 1e-9);
        assert_eq!(normalize_competition_to_0_100(0.5, 1.0, 1.0), 50.0);
    }
}
