//! marketdemand-ingestion — Data sources feeding the scoring pipeline.
//!
//! Loads business, demographic and industry datasets from JSON files or the
//! US Census ACS API, validates them at the boundary, and prepares business
//! listings (filtering, sorting, limiting) for display.

pub mod catalog;
pub mod dataset;
pub mod filtering;
pub mod sources;

pub use catalog::IndustryCatalog;
pub use dataset::{DataConfig, MarketData, SourcesConfig};
pub use filtering::{
    count_by_industry, filter_businesses, prepare_listing, sort_businesses, ListingOptions, SortKey,
};
pub use sources::census::{CensusClient, CensusConfig};
pub use sources::DataSource;
