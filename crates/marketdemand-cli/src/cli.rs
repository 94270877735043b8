//! Command-line interface definitions and argument parsing

use clap::Parser;
use std::path::PathBuf;

use marketdemand_common::Filters;
use marketdemand_ingestion::{DataSource, ListingOptions, SortKey};

/// Estimate market demand for an industry across a set of cities
#[derive(Parser, Debug)]
#[command(name = "marketdemand", author, version, about, long_about = None)]
pub struct Args {
    /// Industry to analyse (prompted for when omitted)
    #[arg(short, long)]
    pub industry: Option<String>,

    /// City to include; repeat or comma-separate. Omit for all cities
    #[arg(short, long = "city", value_delimiter = ',')]
    pub cities: Vec<String>,

    /// Listing sort order: name, revenue, industry or distance
    #[arg(short, long)]
    pub sort_by: Option<SortKey>,

    /// Number of businesses to list
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Path to marketdemand.toml
    #[arg(long, env = "MARKETDEMAND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured demographic source: file or api
    #[arg(long)]
    pub demographics_source: Option<DataSource>,

    /// Print the analysis as JSON instead of the dashboard
    #[arg(long)]
    pub json: bool,

    /// Disable coloured bars
    #[arg(long)]
    pub no_color: bool,

    /// List known industries with business counts and exit
    #[arg(long)]
    pub list_industries: bool,
}

impl Args {
    /// Interactive prompts are only used when nothing else tells us what to analyse.
    pub fn needs_prompt(&self) -> bool {
        self.industry.is_none() && !self.json && !self.list_industries
    }

    pub fn filters(&self) -> Filters {
        let cities: Vec<String> = self
            .cities
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Filters::new(self.industry.as_deref().unwrap_or_default(), &cities)
    }

    pub fn listing(&self, default_limit: usize) -> ListingOptions {
        ListingOptions {
            limit: self.limit.unwrap_or(default_limit),
            sort_by: self.sort_by.unwrap_or_default(),
        }
    }
}

/// Split a comma-separated city list, dropping blanks. Blank input means all cities.
pub fn parse_city_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
