//! JSON file loaders for the three datasets.
//!
//! Expected layouts:
//! - businesses: `[{ "business_name", "city", "industry", "revenue" }, ...]`
//! - demographics: `{ "<city>": { "population", "avg_income" }, ... }`
//! - industries: `{ "<industry>": { "ideal_ppb", "spend_per_capita", "tam_weight"?, "rev_weight"? }, ... }`
//!
//! Every record is validated on load. A record missing a required field is an
//! `InvalidInput` error naming the dataset, never a silently defaulted value.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use marketdemand_common::{BusinessRecord, DemographicsTable, MarketDemandError, Result};

use crate::catalog::IndustryCatalog;
use crate::sources::DemographicSource;

fn read_json<T: DeserializeOwned>(path: &Path, dataset: &str) -> Result<T> {
    if !path.exists() {
        return Err(MarketDemandError::NotFound(format!(
            "{dataset} data file {}",
            path.display()
        )));
    }
    debug!(path = %path.display(), dataset, "Reading dataset");
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        MarketDemandError::invalid(dataset, format!("{}: {e}", path.display()))
    })
}

fn warn_if_empty(len: usize, dataset: &str, path: &Path) {
    if len == 0 {
        warn!(dataset, path = %path.display(), "No {} data loaded", dataset);
    }
}

pub fn load_businesses(path: &Path) -> Result<Vec<BusinessRecord>> {
    let records: Vec<BusinessRecord> = read_json(path, "business")?;
    for record in &records {
        record.validate()?;
    }
    warn_if_empty(records.len(), "business", path);
    info!(path = %path.display(), records = records.len(), "Business data loaded");
    Ok(records)
}

pub fn load_demographics(path: &Path) -> Result<DemographicsTable> {
    let table: DemographicsTable = read_json(path, "demographic")?;
    table.validate()?;
    warn_if_empty(table.len(), "demographic", path);
    info!(path = %path.display(), cities = table.len(), "Demographic data loaded");
    Ok(table)
}

pub fn load_industries(path: &Path) -> Result<IndustryCatalog> {
    let catalog: IndustryCatalog = read_json(path, "industry")?;
    catalog.validate()?;
    warn_if_empty(catalog.len(), "industry", path);
    info!(path = %path.display(), industries = catalog.len(), "Industry data loaded");
    Ok(catalog)
}

/// Demographics backed by a local JSON file.
pub struct DemographicFile {
    path: PathBuf,
}

impl DemographicFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DemographicSource for DemographicFile {
    async fn fetch_demographics(&self) -> Result<DemographicsTable> {
        load_demographics(&self.path)
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn json_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{body}").unwrap();
        file
    }

    #[test]
    fn test_load_businesses() {
        let file = json_file(
            r#"[
                { "business_name": "Bug Busters", "city": "Provo", "industry": "Pest Control", "revenue": 250000 },
                { "business_name": "Crumb & Co", "city": "Orem", "industry": "Bakery", "revenue": 90000.5 }
            ]"#,
        );
        let records = load_businesses(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], BusinessRecord::new("Bug Busters", "Provo", "Pest Control", 250_000.0));
    }

    #[test]
    fn test_missing_revenue_is_invalid_input() {
        let file = json_file(r#"[{ "business_name": "Bug Busters", "city": "Provo", "industry": "Pest Control" }]"#);
        let err = load_businesses(file.path()).unwrap_err();
        match err {
            MarketDemandError::InvalidInput { dataset, reason } => {
                assert_eq!(dataset, "business");
                assert!(reason.contains("revenue"), "reason was: {reason}");
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_avg_income_is_invalid_input() {
        let file = json_file(r#"{ "Provo": { "population": 115000 } }"#);
        match load_demographics(file.path()).unwrap_err() {
            MarketDemandError::InvalidInput { dataset, reason } => {
                assert_eq!(dataset, "demographic");
                assert!(reason.contains("avg_income"), "reason was: {reason}");
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_city_keys_last_wins() {
        let file = json_file(
            r#"{
                "Provo": { "population": 1, "avg_income": 40000 },
                "provo": { "population": 2, "avg_income": 50000 }
            }"#,
        );
        for _ in 0..20 {
            let table = load_demographics(file.path()).unwrap();
            assert_eq!(table.len(), 1);
            assert_eq!(table.get("PROVO").map(|d| d.population), Some(2));
        }
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let file = json_file(r#"[{ "business_name": "X", "city": "Provo", "industry": "Bakery", "revenue": -5 }]"#);
        assert!(matches!(
            load_businesses(file.path()),
            Err(MarketDemandError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_empty_business_file_is_ok() {
        let file = json_file("[]");
        assert!(load_businesses(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_demographics_normalises_keys() {
        let file = json_file(r#"{ "Provo": { "population": 115000, "avg_income": 52000 } }"#);
        let table = load_demographics(file.path()).unwrap();
        assert_eq!(table.get("provo").map(|d| d.population), Some(115_000));
    }

    #[test]
    fn test_load_industries_rejects_overweight() {
        let file = json_file(
            r#"{ "Pest Control": { "ideal_ppb": 5000, "spend_per_capita": 50, "tam_weight": 0.8, "rev_weight": 0.5 } }"#,
        );
        assert!(load_industries(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_industries(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, MarketDemandError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_demographic_file_source() {
        let file = json_file(r#"{ "Orem": { "population": 98000, "avg_income": 61000 } }"#);
        let source = DemographicFile::new(file.path());
        let table = source.fetch_demographics().await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(source.name(), "file");
    }
}
