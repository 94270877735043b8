//! Core records passed between the data sources and the scoring pipeline.
//! Validation happens here, at the I/O boundary, never inside the scorer.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::error::{MarketDemandError, Result};

/// Canonical form of a city (or industry) key: trimmed and lowercase.
pub fn normalise_city_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Business
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub business_name: String,
    pub city: String,
    pub industry: String,
    pub revenue: f64,
}

impl BusinessRecord {
    pub fn new(
        business_name: impl Into<String>,
        city: impl Into<String>,
        industry: impl Into<String>,
        revenue: f64,
    ) -> Self {
        Self {
            business_name: business_name.into(),
            city: city.into(),
            industry: industry.into(),
            revenue,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.revenue.is_finite() || self.revenue < 0.0 {
            return Err(MarketDemandError::invalid(
                "business",
                format!(
                    "revenue for '{}' must be a non-negative number, got {}",
                    self.business_name, self.revenue
                ),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Demographics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityDemographics {
    pub population: u64,
    pub avg_income: f64,
}

impl CityDemographics {
    pub fn new(population: u64, avg_income: f64) -> Self {
        Self { population, avg_income }
    }

    pub fn validate(&self, city: &str) -> Result<()> {
        if !self.avg_income.is_finite() || self.avg_income < 0.0 {
            return Err(MarketDemandError::invalid(
                "demographic",
                format!("avg_income for '{city}' must be a non-negative number, got {}", self.avg_income),
            ));
        }
        Ok(())
    }
}

/// City → demographics mapping with case-insensitive keys.
///
/// Keys are normalised on the way in, so `get("  PROVO ")` and `get("provo")`
/// resolve to the same entry regardless of how the source spelled the city.
/// Source keys that only differ by case or whitespace collapse to one entry;
/// the last one in the document wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(into = "HashMap<String, CityDemographics>")]
pub struct DemographicsTable {
    cities: HashMap<String, CityDemographics>,
}

impl DemographicsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a city. Returns the previous entry for that key.
    pub fn insert(&mut self, city: &str, demographics: CityDemographics) -> Option<CityDemographics> {
        self.cities.insert(normalise_city_key(city), demographics)
    }

    pub fn with(mut self, city: &str, population: u64, avg_income: f64) -> Self {
        self.insert(city, CityDemographics::new(population, avg_income));
        self
    }

    pub fn get(&self, city: &str) -> Option<&CityDemographics> {
        self.cities.get(&normalise_city_key(city))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CityDemographics)> {
        self.cities.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        for (city, demo) in &self.cities {
            demo.validate(city)?;
        }
        Ok(())
    }
}

impl<K: AsRef<str>> FromIterator<(K, CityDemographics)> for DemographicsTable {
    fn from_iter<I: IntoIterator<Item = (K, CityDemographics)>>(iter: I) -> Self {
        let mut table = DemographicsTable::new();
        for (city, demo) in iter {
            table.insert(city.as_ref(), demo);
        }
        table
    }
}

impl<'de> Deserialize<'de> for DemographicsTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Self {
            cities: crate::keyed::deserialize_canonical(deserializer)?,
        })
    }
}

impl From<DemographicsTable> for HashMap<String, CityDemographics> {
    fn from(table: DemographicsTable) -> Self {
        table.cities
    }
}

// ---------------------------------------------------------------------------
// Industry parameters
// ---------------------------------------------------------------------------

/// Per-industry scoring inputs.
///
/// `tam_weight + rev_weight` must not exceed 1; whatever is left over is the
/// competition weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryParams {
    /// Ideal people-per-business for a healthy market
    pub ideal_ppb: f64,
    /// Annual spend per resident on this industry
    pub spend_per_capita: f64,
    #[serde(default = "default_tam_weight")]
    pub tam_weight: f64,
    #[serde(default = "default_rev_weight")]
    pub rev_weight: f64,
}

pub fn default_tam_weight() -> f64 { 0.5 }
pub fn default_rev_weight() -> f64 { 0.2 }

impl Default for IndustryParams {
    /// Degenerate parameters used when an industry is unknown:
    /// zero spend and zero ideal density.
    fn default() -> Self {
        Self {
            ideal_ppb: 0.0,
            spend_per_capita: 0.0,
            tam_weight: default_tam_weight(),
            rev_weight: default_rev_weight(),
        }
    }
}

impl IndustryParams {
    pub fn new(ideal_ppb: f64, spend_per_capita: f64) -> Self {
        Self {
            ideal_ppb,
            spend_per_capita,
            ..Default::default()
        }
    }

    pub fn with_weights(mut self, tam_weight: f64, rev_weight: f64) -> Self {
        self.tam_weight = tam_weight;
        self.rev_weight = rev_weight;
        self
    }

    pub fn validate(&self, industry: &str) -> Result<()> {
        let fields = [
            ("ideal_ppb", self.ideal_ppb),
            ("spend_per_capita", self.spend_per_capita),
            ("tam_weight", self.tam_weight),
            ("rev_weight", self.rev_weight),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(MarketDemandError::invalid(
                    "industry",
                    format!("{name} for '{industry}' must be a non-negative number, got {value}"),
                ));
            }
        }
        if self.tam_weight > 1.0 || self.rev_weight > 1.0 {
            return Err(MarketDemandError::invalid(
                "industry",
                format!("weights for '{industry}' must each be within [0, 1]"),
            ));
        }
        if self.tam_weight + self.rev_weight > 1.0 + 1e-9 {
            return Err(MarketDemandError::invalid(
                "industry",
                format!(
                    "tam_weight + rev_weight for '{industry}' must not exceed 1, got {}",
                    self.tam_weight + self.rev_weight
                ),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Which industry and which cities an analysis covers.
/// An empty `cities` list means every known city.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub industry: String,
    #[serde(default)]
    pub cities: Vec<String>,
}

impl Filters {
    pub fn new<S: AsRef<str>>(industry: &str, cities: &[S]) -> Self {
        Self {
            industry: industry.trim().to_string(),
            cities: cities.iter().map(|c| c.as_ref().trim().to_string()).collect(),
        }
    }

    pub fn all_cities(&self) -> bool {
        self.cities.is_empty()
    }

    /// Requested cities as a set of canonical keys.
    pub fn city_keys(&self) -> BTreeSet<String> {
        self.cities.iter().map(|c| normalise_city_key(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_lookup_is_case_insensitive() {
        let table = DemographicsTable::new().with("Provo", 115_000, 52_000.0);
        assert!(table.get("provo").is_some());
        assert!(table.get("  PROVO ").is_some());
        assert!(table.get("Orem").is_none());
    }

    #[test]
    fn test_table_deserialises_with_normalised_keys() {
        let table: DemographicsTable = serde_json::from_str(
            r#"{ "Salt Lake City": { "population": 200000, "avg_income": 60000 } }"#,
        )
        .unwrap();
        assert_eq!(
            table.get("salt lake city"),
            Some(&CityDemographics::new(200_000, 60_000.0))
        );
    }

    #[test]
    fn test_table_duplicate_keys_last_entry_wins() {
        for _ in 0..50 {
            let table: DemographicsTable = serde_json::from_str(
                r#"{
                    "Provo": { "population": 1, "avg_income": 10 },
                    " provo ": { "population": 2, "avg_income": 20 },
                    "Orem": { "population": 3, "avg_income": 30 }
                }"#,
            )
            .unwrap();
            assert_eq!(table.len(), 2);
            assert_eq!(table.get("Provo"), Some(&CityDemographics::new(2, 20.0)));
        }
    }

    #[test]
    fn test_demographics_missing_income_is_rejected() {
        assert!(serde_json::from_str::<CityDemographics>(r#"{ "population": 5 }"#).is_err());
    }

    #[test]
    fn test_business_missing_revenue_is_rejected() {
        let err = serde_json::from_str::<BusinessRecord>(
            r#"{ "business_name": "Bug Busters", "city": "Provo", "industry": "Pest Control" }"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_negative_revenue_fails_validation() {
        let b = BusinessRecord::new("Bug Busters", "Provo", "Pest Control", -1.0);
        assert!(matches!(b.validate(), Err(MarketDemandError::InvalidInput { .. })));
    }

    #[test]
    fn test_industry_weight_sum_validation() {
        assert!(IndustryParams::new(5000.0, 50.0).validate("pest control").is_ok());
        assert!(IndustryParams::new(5000.0, 50.0)
            .with_weights(0.7, 0.4)
            .validate("pest control")
            .is_err());
        assert!(IndustryParams::new(-1.0, 50.0).validate("pest control").is_err());
    }

    #[test]
    fn test_industry_weights_default_when_absent() {
        let p: IndustryParams =
            serde_json::from_str(r#"{ "ideal_ppb": 5000, "spend_per_capita": 50 }"#).unwrap();
        assert_eq!(p.tam_weight, 0.5);
        assert_eq!(p.rev_weight, 0.2);
    }

    #[test]
    fn test_filter_city_keys_dedupe() {
        let f = Filters::new("Pest Control", &["Provo", " provo ", "Orem"]);
        let keys: Vec<String> = f.city_keys().into_iter().collect();
        assert_eq!(keys, vec!["orem".to_string(), "provo".to_string()]);
        assert!(!f.all_cities());
    }
}
