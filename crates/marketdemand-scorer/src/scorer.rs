//! Demand score composition and the end-to-end market analysis.
//!
//! demand = w_tam·TAM% + w_rev·RevGap + w_comp·Competition, each term in [0, 100]
//! confidence = min(100, ln(1+n) / ln(1+N) · 100)

use serde::{Deserialize, Serialize};

use marketdemand_common::{sentinel, BusinessRecord, DemographicsTable, Filters, IndustryParams};

use crate::competition::{
    calculate_competition_score, calculate_real_ppb, normalize_competition_to_0_100,
};
use crate::market::{
    calculate_current_revenue, calculate_remaining_tam, calculate_remaining_tam_pct, calculate_tam,
};
use crate::normalise::clamp_score;
use crate::population::{aggregate_income, aggregate_population};
use crate::revenue_gap::{
    calculate_actual_revenue_per_business, calculate_expected_revenue_per_business,
    calculate_revenue_gap_score,
};
use crate::weights::{DemandWeights, ScoringPolicy};

/// Sample-size confidence in [0, 100], saturating at `saturation` businesses.
pub fn calc_confidence_index_with(business_count: usize, saturation: u32) -> f64 {
    if business_count == 0 || saturation == 0 {
        return 0.0;
    }
    let curve = (business_count as f64).ln_1p() / (saturation as f64).ln_1p();
    (curve * 100.0).min(100.0)
}

/// Sample-size confidence with the default saturation of 15 businesses.
pub fn calc_confidence_index(business_count: usize) -> f64 {
    calc_confidence_index_with(business_count, ScoringPolicy::default().confidence_saturation)
}

/// Blend the three sub-scores into the final demand score in [0, 100].
///
/// Each component is clamped before weighting; the TAM component is
/// `remaining_tam_pct × 100`.
pub fn calc_demand_score(
    competition_norm: f64,
    remaining_tam_pct: f64,
    rev_opp_score: f64,
    tam_weight: f64,
    rev_weight: f64,
) -> f64 {
    let weights = DemandWeights::new(tam_weight, rev_weight);
    let components = [
        clamp_score(remaining_tam_pct * 100.0),
        clamp_score(rev_opp_score),
        clamp_score(competition_norm),
    ];
    let weighted_sum: f64 = components
        .iter()
        .zip(weights.as_array().iter())
        .map(|(c, w)| c * w)
        .sum();
    clamp_score(weighted_sum)
}

/// Every intermediate and final metric of one analysis.
///
/// All fields are always populated. `real_ppb` and `competition_score` may
/// hold `+inf` (no competitors, or no ideal density); they serialise as
/// `"Infinity"` rather than `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub population: u64,
    pub avg_income: f64,
    pub business_count: usize,
    pub tam: f64,
    pub current_revenue: f64,
    pub remaining_tam: f64,
    pub remaining_pct: f64,
    #[serde(with = "sentinel")]
    pub real_ppb: f64,
    #[serde(with = "sentinel")]
    pub competition_score: f64,
    pub competition_norm: f64,
    pub expected_rev_per_business: f64,
    pub actual_rev_per_business: f64,
    pub rev_opp_score: f64,
    pub demand_score: f64,
    pub confidence_score: f64,
}

/// Run the full pipeline with the default scoring policy.
///
/// `businesses` must already be filtered to the industry and cities of
/// interest; `filters.cities` selects the population to size the market on.
pub fn analyze_market(
    businesses: &[BusinessRecord],
    demographics: &DemographicsTable,
    filters: &Filters,
    params: &IndustryParams,
) -> ScoreResult {
    analyze_market_with_policy(businesses, demographics, filters, params, &ScoringPolicy::default())
}

/// Run the full pipeline with explicit competition bounds and confidence saturation.
pub fn analyze_market_with_policy(
    businesses: &[BusinessRecord],
    demographics: &DemographicsTable,
    filters: &Filters,
    params: &IndustryParams,
    policy: &ScoringPolicy,
) -> ScoreResult {
    // Aggregate
    let population = aggregate_population(demographics, &filters.cities);
    let avg_income = aggregate_income(demographics, &filters.cities);
    let business_count = businesses.len();

    // Size
    let tam = calculate_tam(population, params.spend_per_capita);
    let current_revenue = calculate_current_revenue(businesses);
    let remaining_tam = calculate_remaining_tam(tam, current_revenue);
    let remaining_pct = calculate_remaining_tam_pct(remaining_tam, tam);

    // Competition
    let real_ppb = calculate_real_ppb(population, business_count);
    let competition_score = calculate_competition_score(real_ppb, params.ideal_ppb);
    let competition_norm = normalize_competition_to_0_100(
        competition_score,
        policy.competition_low,
        policy.competition_high,
    );

    // Revenue gap
    let expected_rev_per_business =
        calculate_expected_revenue_per_business(population, params.ideal_ppb, tam);
    let actual_rev_per_business =
        calculate_actual_revenue_per_business(current_revenue, business_count);
    let rev_opp_score =
        calculate_revenue_gap_score(expected_rev_per_business, actual_rev_per_business);

    // Compose
    let demand_score = calc_demand_score(
        competition_norm,
        remaining_pct,
        rev_opp_score,
        params.tam_weight,
        params.rev_weight,
    );
    let confidence_score = calc_confidence_index_with(business_count, policy.confidence_saturation);

    ScoreResult {
        population,
        avg_income,
        business_count,
        tam,
        current_revenue,
        remaining_tam,
        remaining_pct,
        real_ppb,
        competition_score,
        competition_norm,
        expected_rev_per_business,
        actual_rev_per_business,
        rev_opp_score,
        demand_score,
        confidence_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_curve() {
        assert_eq!(calc_confidence_index(0), 0.0);
        assert!((calc_confidence_index(15) - 100.0).abs() < 1e-9);
        assert_eq!(calc_confidence_index(500), 100.0);
        // ln(2)/ln(16) = 0.25
        assert!((calc_confidence_index(1) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_custom_saturation() {
        assert!((calc_confidence_index_with(3, 3) - 100.0).abs() < 1e-9);
        assert_eq!(calc_confidence_index_with(3, 0), 0.0);
    }

    #[test]
    fn test_demand_score_weighted_blend() {
        // 0.5·90 + 0.2·80 + 0.3·75 = 45 + 16 + 22.5
        let d = calc_demand_score(75.0, 0.9, 80.0, 0.5, 0.2);
        assert!((d - 83.5).abs() < 1e-9);
    }

    #[test]
    fn test_demand_score_clamps_components() {
        let d = calc_demand_score(f64::INFINITY, 3.0, 250.0, 0.5, 0.2);
        assert!((d - 100.0).abs() < 1e-9);
        let d = calc_demand_score(f64::NAN, -1.0, -20.0, 0.5, 0.2);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_demand_score_overweighted_never_exceeds_100() {
        let d = calc_demand_score(100.0, 1.0, 100.0, 0.9, 0.9);
        assert!(d <= 100.0);
    }

    #[test]
    fn test_zero_tam_contributes_nothing_to_tam_component() {
        // All weight on TAM: a zero-TAM market scores 0 regardless of the rest
        let d = calc_demand_score(100.0, 0.0, 100.0, 1.0, 0.0);
        assert_eq!(d, 0.0);
    }
}
