//! Dataset source clients.

pub mod census;
pub mod files;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use marketdemand_common::{DemographicsTable, Result};

/// Where a dataset is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    File,
    Api,
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(DataSource::File),
            "api" => Ok(DataSource::Api),
            other => Err(format!("unknown data source '{other}' (expected 'file' or 'api')")),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File => write!(f, "file"),
            DataSource::Api => write!(f, "api"),
        }
    }
}

/// Common interface for anything that can produce city demographics.
#[async_trait]
pub trait DemographicSource: Send + Sync {
    /// Fetch population and income keyed by canonical city name.
    async fn fetch_demographics(&self) -> Result<DemographicsTable>;

    /// Short label for logs.
    fn name(&self) -> &str;
}
