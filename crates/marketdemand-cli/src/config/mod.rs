//! Configuration loading for marketdemand.
//! Reads marketdemand.toml from `--config`, the MARKETDEMAND_CONFIG env var,
//! or the current directory, falling back to built-in defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use marketdemand_ingestion::{CensusConfig, DataConfig, SourcesConfig};
use marketdemand_scorer::ScoringPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "marketdemand.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub census: CensusConfig,
    #[serde(default)]
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "bool_true")]
    pub color: bool,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn bool_true()         -> bool  { true }
fn default_bar_width() -> usize { 25 }
fn default_limit()     -> usize { 10 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: bool_true(),
            bar_width: default_bar_width(),
            default_limit: default_limit(),
        }
    }
}


impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `./marketdemand.toml` is used
    /// when present and built-in defaults otherwise. A relative `data.dir` is
    /// resolved against the directory holding the config file.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!(
                        "Config file not found: {}\n\
                         Copy marketdemand.example.toml to marketdemand.toml and edit it.",
                        p.display()
                    );
                }
                p.to_path_buf()
            }
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    tracing::warn!("No {DEFAULT_CONFIG_FILE} found; using built-in defaults");
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;

        if config.data.dir.is_relative() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                config.data.dir = parent.join(&config.data.dir);
            }
        }

        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.scoring.validate()?;
        if self.display.bar_width == 0 {
            anyhow::bail!("display.bar_width must be at least 1");
        }
        Ok(())
    }
}
