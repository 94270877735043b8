//! Population and income aggregation over a set of cities.
//!
//! City names are matched case-insensitively after trimming. A requested city
//! that is not in the table contributes nothing; an empty request means every
//! known city.

use std::collections::BTreeSet;

use marketdemand_common::{normalise_city_key, CityDemographics, DemographicsTable};

/// Demographic rows selected by `cities`, each city counted once.
fn matched_cities<'a, S: AsRef<str>>(
    demographics: &'a DemographicsTable,
    cities: &[S],
) -> Vec<&'a CityDemographics> {
    if cities.is_empty() {
        return demographics.iter().map(|(_, d)| d).collect();
    }
    let keys: BTreeSet<String> = cities.iter().map(|c| normalise_city_key(c.as_ref())).collect();
    keys.iter().filter_map(|k| demographics.get(k)).collect()
}

/// Total population across the requested cities.
pub fn aggregate_population<S: AsRef<str>>(demographics: &DemographicsTable, cities: &[S]) -> u64 {
    matched_cities(demographics, cities)
        .iter()
        .map(|d| d.population)
        .sum()
}

/// Population-weighted average income across the requested cities.
/// Returns 0.0 when the matched population is zero.
pub fn aggregate_income<S: AsRef<str>>(demographics: &DemographicsTable, cities: &[S]) -> f64 {
    let rows = matched_cities(demographics, cities);
    let population: u64 = rows.iter().map(|d| d.population).sum();
    if population == 0 {
        return 0.0;
    }
    let weighted: f64 = rows
        .iter()
        .map(|d| d.population as f64 * d.avg_income)
        .sum();
    weighted / population as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utah() -> DemographicsTable {
        DemographicsTable::new()
            .with("Provo", 100_000, 50_000.0)
            .with("Orem", 50_000, 80_000.0)
            .with("Alta", 0, 120_000.0)
    }

    #[test]
    fn test_population_case_insensitive() {
        assert_eq!(aggregate_population(&utah(), &["  PROVO", "orem "]), 150_000);
    }

    #[test]
    fn test_population_unknown_city_contributes_zero() {
        assert_eq!(aggregate_population(&utah(), &["Provo", "Atlantis"]), 100_000);
        assert_eq!(aggregate_population(&utah(), &["Atlantis"]), 0);
    }

    #[test]
    fn test_population_empty_request_means_all() {
        let none: [&str; 0] = [];
        assert_eq!(aggregate_population(&utah(), &none), 150_000);
    }

    #[test]
    fn test_population_duplicate_city_counted_once() {
        assert_eq!(aggregate_population(&utah(), &["Provo", "provo"]), 100_000);
    }

    #[test]
    fn test_income_is_population_weighted() {
        // (100k * 50k + 50k * 80k) / 150k = 60k
        let income = aggregate_income(&utah(), &["Provo", "Orem"]);
        assert!((income - 60_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_income_zero_population_guard() {
        assert_eq!(aggregate_income(&utah(), &["Alta"]), 0.0);
        assert_eq!(aggregate_income(&DemographicsTable::new(), &["Provo"]), 0.0);
    }
}
