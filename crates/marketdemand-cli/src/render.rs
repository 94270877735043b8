//! Terminal dashboard rendering.
//!
//! Everything renders into a `String` so the caller decides where it goes.

use console::style;

use marketdemand_common::{BusinessRecord, Filters};
use marketdemand_scorer::ScoreResult;

const RULE_WIDTH: usize = 60;

/// Qualitative band for a 0–100 bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStatus {
    High,
    Moderate,
    Low,
}

impl BarStatus {
    pub fn from_value(value: f64) -> Self {
        if value >= 70.0 {
            BarStatus::High
        } else if value >= 40.0 {
            BarStatus::Moderate
        } else {
            BarStatus::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BarStatus::High => "High",
            BarStatus::Moderate => "Moderate",
            BarStatus::Low => "Low",
        }
    }
}

/// Overall reading of the demand score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketOutlook {
    HighOpportunity,
    ModerateOpportunity,
    Crowded,
}

impl MarketOutlook {
    pub fn classify(demand_score: f64) -> Self {
        if demand_score > 80.0 {
            MarketOutlook::HighOpportunity
        } else if demand_score > 50.0 {
            MarketOutlook::ModerateOpportunity
        } else {
            MarketOutlook::Crowded
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketOutlook::HighOpportunity => "High Opportunity",
            MarketOutlook::ModerateOpportunity => "Moderate Opportunity",
            MarketOutlook::Crowded => "Crowded",
        }
    }
}

/// One horizontal bar: `Demand Score        73.5%  ██████████████████░░░░░░░  (High)`
pub fn render_bar(value: f64, label: &str, width: usize, color: bool) -> String {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) };
    let filled = (((value / 100.0) * width as f64).floor() as usize).min(width);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(width - filled));
    let status = BarStatus::from_value(value);

    let bar = if color {
        match status {
            BarStatus::High => style(bar).green().to_string(),
            BarStatus::Moderate => style(bar).yellow().to_string(),
            BarStatus::Low => style(bar).red().to_string(),
        }
    } else {
        bar
    };

    format!("{:<18} {:6.1}%  {}  ({})", label, value, bar, status.label())
}

/// Round to whole units and group thousands: `4302290.4` → `4,302,290`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "∞".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_dollars(value: f64) -> String {
    format!("${}", format_thousands(value))
}

pub fn render_business_list(businesses: &[BusinessRecord]) -> String {
    let mut out = String::from("=== BUSINESS RESULTS ===\n");
    if businesses.is_empty() {
        out.push_str("(no matching businesses)\n");
    }
    for b in businesses {
        out.push_str(&format!(
            "{} — {} — {} — {}\n",
            b.business_name,
            b.city,
            b.industry,
            format_dollars(b.revenue)
        ));
    }
    out
}

/// Full dashboard: business listing, score bars and the market summary.
pub fn render_dashboard(
    listing: &[BusinessRecord],
    filters: &Filters,
    ideal_ppb: f64,
    result: &ScoreResult,
    bar_width: usize,
    color: bool,
) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let cities = if filters.all_cities() {
        "all".to_string()
    } else {
        filters.cities.join(", ")
    };
    let ppb = if result.real_ppb.is_infinite() {
        format!("no competitors yet (ideal {})", format_thousands(ideal_ppb))
    } else {
        format!("{} (ideal {})", format_thousands(result.real_ppb), format_thousands(ideal_ppb))
    };
    let competition = if result.competition_score.is_infinite() {
        "open".to_string()
    } else {
        format!("{:+.2} log2", result.competition_score)
    };

    let lines = [
        String::new(),
        "=== MARKET ANALYSIS DASHBOARD ===".to_string(),
        format!("Industry: {}  |  Cities: {}", filters.industry, cities),
        rule.clone(),
        render_bar(result.demand_score, "Demand Score", bar_width, color),
        render_bar(result.confidence_score, "Confidence Index", bar_width, color),
        render_bar(result.remaining_pct * 100.0, "TAM Remaining", bar_width, color),
        rule,
        format!(
            "Population: {}  |  Businesses: {}",
            format_thousands(result.population as f64),
            result.business_count
        ),
        format!("Average Income: {}", format_dollars(result.avg_income)),
        format!(
            "TAM: {}  |  Current Revenue: {}",
            format_dollars(result.tam),
            format_dollars(result.current_revenue)
        ),
        format!(
            "Remaining TAM: {}  ({:.2}%)",
            format_dollars(result.remaining_tam),
            result.remaining_pct * 100.0
        ),
        format!("People per Business: {ppb}"),
        format!(
            "Competition: {} ({:.1}/100)  |  Revenue Gap: {:.1}/100",
            competition, result.competition_norm, result.rev_opp_score
        ),
        format!("Outlook: {}", MarketOutlook::classify(result.demand_score).label()),
    ];

    let mut out = render_business_list(listing);
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
