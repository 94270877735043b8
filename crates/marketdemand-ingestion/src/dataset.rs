//! Loading all three datasets according to configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use marketdemand_common::{BusinessRecord, DemographicsTable, Result};

use crate::catalog::IndustryCatalog;
use crate::sources::census::{CensusClient, CensusConfig};
use crate::sources::files::{load_businesses, load_industries, DemographicFile};
use crate::sources::{DataSource, DemographicSource};

/// Locations of the JSON datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_business_file")]
    pub business_file: String,
    #[serde(default = "default_demographic_file")]
    pub demographic_file: String,
    #[serde(default = "default_industry_file")]
    pub industry_file: String,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_business_file() -> String { "sample_business_data.json".to_string() }
fn default_demographic_file() -> String { "sample_demographic_data.json".to_string() }
fn default_industry_file() -> String { "industry_data.json".to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            business_file: default_business_file(),
            demographic_file: default_demographic_file(),
            industry_file: default_industry_file(),
        }
    }
}

impl DataConfig {
    pub fn business_path(&self) -> PathBuf {
        self.dir.join(&self.business_file)
    }

    pub fn demographic_path(&self) -> PathBuf {
        self.dir.join(&self.demographic_file)
    }

    pub fn industry_path(&self) -> PathBuf {
        self.dir.join(&self.industry_file)
    }
}

/// Which backend each dataset comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub business: DataSource,
    #[serde(default)]
    pub demographic: DataSource,
    #[serde(default)]
    pub industry: DataSource,
}

/// Everything the scorer needs, fully materialised.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    pub businesses: Vec<BusinessRecord>,
    pub demographics: DemographicsTable,
    pub industries: IndustryCatalog,
}

impl MarketData {
    pub async fn load(data: &DataConfig, sources: &SourcesConfig, census: &CensusConfig) -> Result<Self> {
        let businesses = match sources.business {
            DataSource::File => load_businesses(&data.business_path())?,
            DataSource::Api => {
                warn!("No business API is available; continuing with no business data");
                Vec::new()
            }
        };

        let demographic_source: Box<dyn DemographicSource> = match sources.demographic {
            DataSource::File => Box::new(DemographicFile::new(data.demographic_path())),
            DataSource::Api => Box::new(CensusClient::new(census.clone())?),
        };
        let demographics = match (sources.demographic, demographic_source.fetch_demographics().await) {
            (_, Ok(table)) => table,
            // API failures degrade to an empty table; file errors propagate
            (DataSource::Api, Err(e)) => {
                warn!(source = demographic_source.name(), error = %e, "Demographic API request failed; continuing without demographics");
                DemographicsTable::new()
            }
            (DataSource::File, Err(e)) => return Err(e),
        };
        if demographics.is_empty() {
            warn!(source = demographic_source.name(), "No demographic data loaded");
        }

        let industries = match sources.industry {
            DataSource::File => load_industries(&data.industry_path())?,
            DataSource::Api => {
                warn!("No industry API is available; continuing with no industry data");
                IndustryCatalog::new()
            }
        };

        info!(
            businesses = businesses.len(),
            cities = demographics.len(),
            industries = industries.len(),
            "Market data ready"
        );

        Ok(Self {
            businesses,
            demographics,
            industries,
        })
    }
}
