//! marketdemand-scorer — Market demand scoring engine.
//!
//! A single forward pipeline, every stage a pure function:
//! population → market size → {competition, revenue gap} → demand score.

pub mod population;
pub mod market;
pub mod competition;
pub mod revenue_gap;
pub mod normalise;
pub mod weights;
pub mod scorer;

pub use scorer::{analyze_market, analyze_market_with_policy, ScoreResult};
pub use weights::{DemandWeights, ScoringPolicy};
