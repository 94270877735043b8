//! US Census Bureau ACS 5-year REST API client.
//! Used for fetching population (B01003_001E) and median household income
//! (B19013_001E) for every place in a state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use marketdemand_common::{CityDemographics, DemographicsTable, MarketDemandError, Result};

use crate::sources::DemographicSource;

const POPULATION_VAR: &str = "B01003_001E";
const INCOME_VAR: &str = "B19013_001E";
const NAME_VAR: &str = "NAME";

/// Census reports missing income as large negative sentinels; anything above
/// this is treated as bad data too.
const MAX_PLAUSIBLE_INCOME: i64 = 1_000_000;

/// Suffixes the Census appends to place names ("Provo city", "Alta town").
const PLACE_SUFFIXES: &[&str] = &[" metro township", " city", " town", " cdp", " village"];

/// Environment variable consulted when no API key is configured.
pub const CENSUS_API_KEY_ENV: &str = "MARKETDEMAND_CENSUS_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_year")]
    pub year: u16,
    /// Two-digit state FIPS code (Utah = 49)
    #[serde(default = "default_state_fips")]
    pub state_fips: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String { "https://api.census.gov/data".to_string() }
fn default_year() -> u16 { 2022 }
fn default_state_fips() -> String { "49".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            year: default_year(),
            state_fips: default_state_fips(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CensusConfig {
    /// Configured key, or the environment variable when the config leaves it empty.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(CENSUS_API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

pub struct CensusClient {
    client: reqwest::Client,
    config: CensusConfig,
    api_key: Option<String>,
}

impl CensusClient {
    pub fn new(config: CensusConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let api_key = config.resolved_api_key();
        if api_key.is_none() {
            warn!("No Census API key configured; requests are subject to anonymous rate limits");
        }
        Ok(Self { client, config, api_key })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/acs/acs5",
            self.config.base_url.trim_end_matches('/'),
            self.config.year
        )
    }

    /// Fetch population and income for every place in the configured state.
    pub async fn fetch_places(&self) -> Result<DemographicsTable> {
        let url = self.endpoint();
        let get = format!("{NAME_VAR},{POPULATION_VAR},{INCOME_VAR}");
        let state = format!("state:{}", self.config.state_fips);

        let mut query: Vec<(&str, &str)> = vec![
            ("get", get.as_str()),
            ("for", "place:*"),
            ("in", state.as_str()),
        ];
        if let Some(ref key) = self.api_key {
            query.push(("key", key.as_str()));
        }

        info!(url = %url, state = %self.config.state_fips, "Fetching Census ACS place demographics");

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        let table = parse_acs_response(&resp)?;
        info!(places = table.len(), "Census demographics parsed");
        Ok(table)
    }
}

#[async_trait]
impl DemographicSource for CensusClient {
    async fn fetch_demographics(&self) -> Result<DemographicsTable> {
        self.fetch_places().await
    }

    fn name(&self) -> &str {
        "census"
    }
}

/// Turn a Census place name such as `"Provo city, Utah"` into a stable key (`"provo"`).
pub fn normalize_place_name(raw_name: &str) -> String {
    let place = raw_name.split(',').next().unwrap_or_default();
    let mut s = place.trim().to_lowercase();
    for suffix in PLACE_SUFFIXES {
        if let Some(stripped) = s.strip_suffix(suffix) {
            s = stripped.trim().to_string();
            break;
        }
    }
    s
}

fn cell_as_i64(cell: &Value) -> Option<i64> {
    match cell {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Parse an ACS response: a JSON array whose first row holds the column names.
///
/// Rows with unparseable numbers, negative population, or income outside
/// (0, 1,000,000] are skipped.
pub fn parse_acs_response(body: &Value) -> Result<DemographicsTable> {
    let rows = body
        .as_array()
        .ok_or_else(|| MarketDemandError::invalid("census", "response is not a JSON array"))?;
    let header = rows
        .first()
        .and_then(Value::as_array)
        .ok_or_else(|| MarketDemandError::invalid("census", "response has no header row"))?;

    let column = |name: &str| -> Result<usize> {
        header
            .iter()
            .position(|h| h.as_str() == Some(name))
            .ok_or_else(|| MarketDemandError::invalid("census", format!("missing column {name}")))
    };
    let name_idx = column(NAME_VAR)?;
    let pop_idx = column(POPULATION_VAR)?;
    let income_idx = column(INCOME_VAR)?;

    let mut table = DemographicsTable::new();
    let mut skipped = 0usize;

    for row in rows.iter().skip(1) {
        let Some(cells) = row.as_array() else {
            skipped += 1;
            continue;
        };
        let name = cells.get(name_idx).and_then(Value::as_str);
        let population = cells.get(pop_idx).and_then(cell_as_i64);
        let income = cells.get(income_idx).and_then(cell_as_i64);

        match (name, population, income) {
            (Some(name), Some(pop), Some(inc))
                if pop >= 0 && inc > 0 && inc <= MAX_PLAUSIBLE_INCOME =>
            {
                let city = normalize_place_name(name);
                table.insert(&city, CityDemographics::new(pop as u64, inc as f64));
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "Skipped Census rows with missing or sentinel values");
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_place_name() {
        assert_eq!(normalize_place_name("Provo city, Utah"), "provo");
        assert_eq!(normalize_place_name("Alta town, Utah"), "alta");
        assert_eq!(normalize_place_name("Millcreek metro township"), "millcreek");
        assert_eq!(normalize_place_name("  Kearns CDP "), "kearns");
        assert_eq!(normalize_place_name("Salt Lake City city, Utah"), "salt lake city");
        assert_eq!(normalize_place_name(""), "");
    }

    #[test]
    fn test_parse_acs_response_skips_sentinels() {
        let body = json!([
            ["NAME", "B01003_001E", "B19013_001E", "state", "place"],
            ["Provo city, Utah", "115162", "53000", "49", "62470"],
            ["Alta town, Utah", "383", "-666666666", "49", "01310"],
            ["Orem city, Utah", "98129", null, "49", "57300"],
            ["Lehi city, Utah", "not-a-number", "98000", "49", "44320"],
            ["Rich Town, Utah", "10", "2500000", "49", "00000"]
        ]);
        let table = parse_acs_response(&body).unwrap();
        assert_eq!(table.len(), 1);
        let provo = table.get("Provo").unwrap();
        assert_eq!(provo.population, 115_162);
        assert_eq!(provo.avg_income, 53_000.0);
    }

    #[test]
    fn test_parse_acs_response_column_order_from_header() {
        let body = json!([
            ["B19013_001E", "NAME", "B01003_001E"],
            ["70000", "Orem city, Utah", "98129"]
        ]);
        let table = parse_acs_response(&body).unwrap();
        assert_eq!(table.get("orem").map(|d| d.population), Some(98_129));
    }

    #[test]
    fn test_parse_acs_response_missing_column() {
        let body = json!([["NAME", "B01003_001E"], ["Provo city, Utah", "115162"]]);
        assert!(matches!(
            parse_acs_response(&body),
            Err(MarketDemandError::InvalidInput { .. })
        ));
        assert!(parse_acs_response(&json!({ "error": "bad key" })).is_err());
    }

    #[test]
    fn test_endpoint_and_key_resolution() {
        let config = CensusConfig {
            base_url: "https://example.test/data/".to_string(),
            year: 2021,
            api_key: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_api_key().as_deref(), Some("abc"));
        let client = CensusClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "https://example.test/data/2021/acs/acs5");
    }
}
