//! Total addressable market (TAM) sizing.

use marketdemand_common::BusinessRecord;

/// TAM = population × per-capita spend. Not clamped.
pub fn calculate_tam(population: u64, spend_per_capita: f64) -> f64 {
    population as f64 * spend_per_capita
}

/// Observed revenue across the business set.
pub fn calculate_current_revenue(businesses: &[BusinessRecord]) -> f64 {
    businesses.iter().map(|b| b.revenue).sum()
}

/// Unserved demand. Revenue beyond the TAM estimate is clipped, never reported as a deficit.
pub fn calculate_remaining_tam(tam: f64, current_revenue: f64) -> f64 {
    (tam - current_revenue).max(0.0)
}

/// Share of the TAM still unserved, in [0, 1].
///
/// A market with no TAM reports 0, not 1: "nothing to address" is kept
/// distinct from "entirely open".
pub fn calculate_remaining_tam_pct(remaining_tam: f64, tam: f64) -> f64 {
    if tam <= 0.0 {
        return 0.0;
    }
    (remaining_tam / tam).clamp(0.0, 1.0)
}
