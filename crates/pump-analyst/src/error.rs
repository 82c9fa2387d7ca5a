//! Error Types for the Pump Analyst

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalystError>;

#[derive(Error, Debug)]
pub enum AnalystError {
    #[error("Pump Studio API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Unknown mint: {0}")]
    UnknownMint(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalystError {
    /// Short machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AnalystError::Api { .. } => "UPSTREAM_ERROR",
            AnalystError::UnknownMint(_) => "UNKNOWN_MINT",
            AnalystError::Config(_) => "CONFIG_ERROR",
            AnalystError::Network(_) => "NETWORK_ERROR",
            AnalystError::Serialization(_) => "INVALID_RESPONSE",
        }
    }
}
