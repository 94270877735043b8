//! Analysis orchestration shared by the dashboard and JSON outputs.

use serde::Serialize;

use marketdemand_common::{normalise_city_key, BusinessRecord, Filters, IndustryParams};
use marketdemand_ingestion::{
    count_by_industry, filter_businesses, prepare_listing, ListingOptions, MarketData,
};
use marketdemand_scorer::{analyze_market_with_policy, ScoreResult, ScoringPolicy};

/// One completed analysis, ready to render or serialise.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub filters: Filters,
    pub industry_params: IndustryParams,
    pub result: ScoreResult,
    /// Sorted and truncated listing for display; scoring uses every match
    pub businesses: Vec<BusinessRecord>,
}

/// Filter, score, then prepare the display listing.
pub fn run_analysis(
    data: &MarketData,
    filters: &Filters,
    listing: &ListingOptions,
    policy: &ScoringPolicy,
) -> AnalysisReport {
    let matched = filter_businesses(&data.businesses, filters);
    let industry_params = data.industries.resolve(&filters.industry);
    let result = analyze_market_with_policy(&matched, &data.demographics, filters, &industry_params, policy);

    tracing::debug!(
        industry = %filters.industry,
        matched = matched.len(),
        demand = result.demand_score,
        "Analysis complete"
    );

    AnalysisReport {
        filters: filters.clone(),
        industry_params,
        result,
        businesses: prepare_listing(matched, listing),
    }
}

/// Known industries from the catalog plus business counts from the dataset.
pub fn render_industry_list(data: &MarketData) -> String {
    let counts = count_by_industry(&data.businesses);
    let mut out = String::from("=== INDUSTRIES ===\n");
    for name in data.industries.names() {
        let params = data.industries.resolve(name);
        let businesses = counts
            .iter()
            .filter(|(industry, _)| normalise_city_key(industry) == normalise_city_key(name))
            .map(|(_, n)| n)
            .sum::<usize>();
        out.push_str(&format!(
            "{name}: ideal {} people/business, ${} per capita, {businesses} businesses\n",
            params.ideal_ppb, params.spend_per_capita
        ));
    }
    for (industry, n) in &counts {
        if data.industries.get(industry).is_none() {
            out.push_str(&format!("{industry}: no catalog entry, {n} businesses\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketdemand_common::DemographicsTable;
    use marketdemand_ingestion::{IndustryCatalog, SortKey};
    use pretty_assertions::assert_eq;

    fn data() -> MarketData {
        MarketData {
            businesses: vec![
                BusinessRecord::new("Bug Busters", "Provo", "Pest Control", 300_000.0),
                BusinessRecord::new("Critter Control", "Provo", "Pest Control", 500_000.0),
                BusinessRecord::new("Sweet Crumbs", "Orem", "Bakery", 200_000.0),
                BusinessRecord::new("Yoga Loft", "Orem", "Yoga", 90_000.0),
            ],
            demographics: DemographicsTable::new()
                .with("Provo", 100_000, 50_000.0)
                .with("Orem", 90_000, 60_000.0),
            industries: IndustryCatalog::new()
                .with("Pest Control", IndustryParams::new(20_000.0, 50.0))
                .with("Bakery", IndustryParams::new(8_000.0, 120.0)),
        }
    }

    #[test]
    fn test_listing_is_truncated_but_scoring_is_not() {
        let filters = Filters::new("pest control", &["Provo"]);
        let listing = ListingOptions { limit: 1, sort_by: SortKey::Revenue };
        let report = run_analysis(&data(), &filters, &listing, &ScoringPolicy::default());

        assert_eq!(report.result.business_count, 2);
        assert_eq!(report.result.current_revenue, 800_000.0);
        assert_eq!(report.businesses.len(), 1);
        assert_eq!(report.businesses[0].business_name, "Critter Control");
        assert_eq!(report.industry_params.ideal_ppb, 20_000.0);
    }

    #[test]
    fn test_report_serialises_infinite_ppb() {
        let filters = Filters::new("Bakery", &["Provo"]);
        let report = run_analysis(&data(), &filters, &ListingOptions::default(), &ScoringPolicy::default());
        assert_eq!(report.result.business_count, 0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"]["real_ppb"], "Infinity");
        assert_eq!(json["filters"]["industry"], "Bakery");
    }

    #[test]
    fn test_industry_list() {
        let out = render_industry_list(&data());
        assert!(out.contains("pest control: ideal 20000 people/business"));
        assert!(out.contains("2 businesses"));
        assert!(out.contains("Yoga: no catalog entry, 1 businesses"));
    }
}
