//! Component weights and tunable scoring policy for the demand score.

use serde::{Deserialize, Serialize};

use marketdemand_common::{IndustryParams, MarketDemandError, Result};

use crate::competition::{DEFAULT_HIGH, DEFAULT_LOW};

/// The three-component weight vector.
/// Competition takes whatever the TAM and revenue weights leave over, so the
/// three always sum to 1.0 when `tam + revenue <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandWeights {
    /// Remaining-TAM share
    pub tam: f64,
    /// Revenue-gap opportunity
    pub revenue: f64,
}

impl Default for DemandWeights {
    fn default() -> Self {
        Self {
            tam: 0.5,
            revenue: 0.2,
        }
    }
}

impl DemandWeights {
    pub fn new(tam: f64, revenue: f64) -> Self {
        Self { tam, revenue }
    }

    pub fn from_params(params: &IndustryParams) -> Self {
        Self::new(params.tam_weight, params.rev_weight)
    }

    /// Competition weight: `max(0, 1 - tam - revenue)`.
    pub fn competition(&self) -> f64 {
        (1.0 - self.tam - self.revenue).max(0.0)
    }

    /// Validate that all weights sum to ~1.0
    pub fn validate(&self) -> bool {
        let sum: f64 = self.as_array().iter().sum();
        (sum - 1.0).abs() < 1e-6
    }

    /// `[tam, revenue, competition]`
    pub fn as_array(&self) -> [f64; 3] {
        [self.tam, self.revenue, self.competition()]
    }
}

/// Policy constants that shape the sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Log2 competition score treated as fully saturated
    #[serde(default = "default_competition_low")]
    pub competition_low: f64,
    /// Log2 competition score treated as fully open
    #[serde(default = "default_competition_high")]
    pub competition_high: f64,
    /// Business count at which the confidence index reaches 100
    #[serde(default = "default_confidence_saturation")]
    pub confidence_saturation: u32,
}

fn default_competition_low() -> f64 { DEFAULT_LOW }
fn default_competition_high() -> f64 { DEFAULT_HIGH }
fn default_confidence_saturation() -> u32 { 15 }

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            competition_low: default_competition_low(),
            competition_high: default_competition_high(),
            confidence_saturation: default_confidence_saturation(),
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<()> {
        if !self.competition_low.is_finite() || !self.competition_high.is_finite() {
            return Err(MarketDemandError::Config(
                "competition bounds must be finite".to_string(),
            ));
        }
        if self.competition_low >= self.competition_high {
            return Err(MarketDemandError::Config(format!(
                "competition_low ({}) must be below competition_high ({})",
                self.competition_low, self.competition_high
            )));
        }
        if self.confidence_saturation == 0 {
            return Err(MarketDemandError::Config(
                "confidence_saturation must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
