use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDemandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid {dataset} input: {reason}")]
    InvalidInput { dataset: String, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MarketDemandError {
    pub fn invalid(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        MarketDemandError::InvalidInput {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarketDemandError>;
