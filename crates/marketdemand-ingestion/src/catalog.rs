//! Industry parameter catalog with case-insensitive lookup.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::warn;

use marketdemand_common::keyed::deserialize_canonical;
use marketdemand_common::{normalise_city_key, IndustryParams, Result};

/// Key of the catch-all entry used for industries without their own row.
pub const FALLBACK_INDUSTRY: &str = "default";

/// Industry keys are canonicalised on load; of two rows differing only by
/// case or whitespace, the later one is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(into = "HashMap<String, IndustryParams>")]
pub struct IndustryCatalog {
    industries: HashMap<String, IndustryParams>,
}

impl IndustryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, industry: &str, params: IndustryParams) -> Self {
        self.industries.insert(normalise_city_key(industry), params);
        self
    }

    pub fn get(&self, industry: &str) -> Option<&IndustryParams> {
        self.industries.get(&normalise_city_key(industry))
    }

    /// Parameters for `industry`, falling back to the `default` row.
    ///
    /// With no match and no fallback the degenerate [`IndustryParams::default`]
    /// is returned, so an unknown industry contributes zero market size
    /// instead of aborting the analysis.
    pub fn resolve(&self, industry: &str) -> IndustryParams {
        if let Some(params) = self.get(industry) {
            return *params;
        }
        if let Some(params) = self.industries.get(FALLBACK_INDUSTRY) {
            warn!(industry, "No industry parameters found, using default entry");
            return *params;
        }
        warn!(industry, "No industry parameters and no default entry; market size will be zero");
        IndustryParams::default()
    }

    /// Known industry keys, sorted, excluding the fallback row.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .industries
            .keys()
            .map(String::as_str)
            .filter(|k| *k != FALLBACK_INDUSTRY)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.industries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        for (industry, params) in &self.industries {
            params.validate(industry)?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for IndustryCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Self {
            industries: deserialize_canonical(deserializer)?,
        })
    }
}

impl From<IndustryCatalog> for HashMap<String, IndustryParams> {
    fn from(catalog: IndustryCatalog) -> Self {
        catalog.industries
    }
}
