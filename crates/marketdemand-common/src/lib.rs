//! marketdemand-common — Shared records, errors, and helpers used across all marketdemand crates.

pub mod error;
pub mod entities;
pub mod keyed;
pub mod sentinel;

// Re-export commonly used types
pub use entities::{
    normalise_city_key, BusinessRecord, CityDemographics, DemographicsTable, Filters,
    IndustryParams,
};
pub use error::{MarketDemandError, Result};
