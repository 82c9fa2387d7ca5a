//! Error Types

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Provider-side error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Non-success HTTP status from the provider
    #[error("Provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response envelope parsed but carried no usable text
    #[error("{0} returned empty content")]
    EmptyCompletion(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Map a non-success HTTP status to the matching variant
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => AgentError::Auth(format!("HTTP {}: {}", status, body)),
            429 => AgentError::RateLimited(body),
            _ => AgentError::Http { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(AgentError::from_status(401, "bad key"), AgentError::Auth(_)));
        assert!(matches!(AgentError::from_status(429, "slow down"), AgentError::RateLimited(_)));
        assert!(matches!(
            AgentError::from_status(500, "boom"),
            AgentError::Http { status: 500, .. }
        ));
    }
}
