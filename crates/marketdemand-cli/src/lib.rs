//! marketdemand — command-line market demand estimator.
//!
//! Collects filters from flags or prompts, loads the configured datasets,
//! runs the scoring pipeline and renders a terminal dashboard (or JSON).

pub mod app;
pub mod cli;
pub mod config;
pub mod prompts;
pub mod render;
