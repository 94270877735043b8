//! Revenue gap scoring: how far actual revenue per business falls short of
//! what an ideally-dense market would support.

use crate::normalise::ratio_or_zero;

/// Revenue each business would earn if the TAM were split across the ideal
/// number of businesses (`population / ideal_ppb`).
pub fn calculate_expected_revenue_per_business(population: u64, ideal_ppb: f64, tam: f64) -> f64 {
    if ideal_ppb <= 0.0 {
        return 0.0;
    }
    let ideal_count = population as f64 / ideal_ppb;
    ratio_or_zero(tam, ideal_count)
}

pub fn calculate_actual_revenue_per_business(current_revenue: f64, business_count: usize) -> f64 {
    ratio_or_zero(current_revenue, business_count as f64)
}

/// Opportunity score in [0, 100]. Businesses earning more than expected
/// floor the score at 0.
pub fn calculate_revenue_gap_score(expected: f64, actual: f64) -> f64 {
    if expected <= 0.0 || expected.is_nan() {
        return 0.0;
    }
    let gap_pct = (expected - actual) / expected;
    if gap_pct.is_nan() {
        return 0.0;
    }
    gap_pct.clamp(0.0, 1.0) * 100.0
}
