//! Interactive filter collection.

use dialoguer::{theme::ColorfulTheme, Input, Select};

use marketdemand_common::Filters;
use marketdemand_ingestion::{ListingOptions, SortKey};

use crate::cli::parse_city_list;

const SORT_CHOICES: [(&str, SortKey); 4] = [
    ("Business name", SortKey::BusinessName),
    ("Revenue", SortKey::Revenue),
    ("Industry", SortKey::Industry),
    ("Distance", SortKey::Distance),
];

/// Ask for result count, industry, cities and sort order.
///
/// `known_industries` is only shown as a hint; any industry may be entered.
pub fn prompt_filters(
    defaults: &ListingOptions,
    known_industries: &[&str],
) -> anyhow::Result<(Filters, ListingOptions)> {
    let theme = ColorfulTheme::default();

    let limit: usize = Input::with_theme(&theme)
        .with_prompt("How many results to display?")
        .default(defaults.limit)
        .interact_text()?;

    if !known_industries.is_empty() {
        println!("Known industries: {}", known_industries.join(", "));
    }
    let industry: String = Input::with_theme(&theme)
        .with_prompt("Industry")
        .interact_text()?;

    let cities: String = Input::with_theme(&theme)
        .with_prompt("Cities (comma separated, blank for all)")
        .allow_empty(true)
        .interact_text()?;

    let labels: Vec<&str> = SORT_CHOICES.iter().map(|(label, _)| *label).collect();
    let default_idx = SORT_CHOICES
        .iter()
        .position(|(_, key)| *key == defaults.sort_by)
        .unwrap_or(0);
    let choice = Select::with_theme(&theme)
        .with_prompt("Sort by")
        .items(&labels)
        .default(default_idx)
        .interact()?;

    let filters = Filters::new(&industry, &parse_city_list(&cities));
    let listing = ListingOptions {
        limit,
        sort_by: SORT_CHOICES[choice].1,
    };
    Ok((filters, listing))
}
