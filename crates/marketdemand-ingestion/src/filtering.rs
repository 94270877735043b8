//! Business filtering, sorting and listing preparation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use marketdemand_common::{normalise_city_key, BusinessRecord, Filters};

/// Listing sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    BusinessName,
    /// Highest revenue first
    Revenue,
    Industry,
    /// Not supported yet; keeps input order
    Distance,
}

impl FromStr for SortKey {
    type Err = String;

    /// Accepts names as well as the menu numbers 1–4.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "name" | "business_name" => Ok(SortKey::BusinessName),
            "2" | "revenue" => Ok(SortKey::Revenue),
            "3" | "industry" => Ok(SortKey::Industry),
            "4" | "distance" => Ok(SortKey::Distance),
            other => Err(format!(
                "unknown sort key '{other}' (expected name, revenue, industry or distance)"
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::BusinessName => "business_name",
            SortKey::Revenue => "revenue",
            SortKey::Industry => "industry",
            SortKey::Distance => "distance",
        };
        f.write_str(s)
    }
}

/// How the business list is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    pub limit: usize,
    pub sort_by: SortKey,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            sort_by: SortKey::BusinessName,
        }
    }
}

/// Keep businesses matching the industry and any of the cities.
/// An empty industry or an empty city list matches everything.
pub fn filter_businesses(records: &[BusinessRecord], filters: &Filters) -> Vec<BusinessRecord> {
    let industry = normalise_city_key(&filters.industry);
    let cities: BTreeSet<String> = filters.city_keys();

    records
        .iter()
        .filter(|b| industry.is_empty() || normalise_city_key(&b.industry) == industry)
        .filter(|b| cities.is_empty() || cities.contains(&normalise_city_key(&b.city)))
        .cloned()
        .collect()
}

/// Stable sort by the requested key.
pub fn sort_businesses(mut records: Vec<BusinessRecord>, key: SortKey) -> Vec<BusinessRecord> {
    match key {
        SortKey::BusinessName => {
            records.sort_by_cached_key(|b| b.business_name.to_lowercase());
        }
        SortKey::Revenue => {
            records.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        }
        SortKey::Industry => {
            records.sort_by_cached_key(|b| b.industry.to_lowercase());
        }
        SortKey::Distance => {
            warn!("Distance sort is not implemented; keeping original order");
        }
    }
    records
}

/// Sort then truncate to `limit`.
pub fn prepare_listing(records: Vec<BusinessRecord>, options: &ListingOptions) -> Vec<BusinessRecord> {
    let mut sorted = sort_businesses(records, options.sort_by);
    sorted.truncate(options.limit);
    sorted
}

/// Number of businesses per industry, keyed by the industry as written.
pub fn count_by_industry(records: &[BusinessRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for b in records {
        *counts.entry(b.industry.clone()).or_insert(0) += 1;
    }
    counts
}
