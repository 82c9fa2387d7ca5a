//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for the hosted LLM providers (Anthropic, OpenAI)
//! so callers can dispatch on a [`ProviderKind`] without knowing wire formats.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{LlmProvider, ProviderFactory, ProviderKind};
//!
//! let provider = factory.build(ProviderKind::Anthropic, &api_key)?;
//! let completion = provider
//!     .complete(&messages, &ProviderKind::Anthropic.default_options())
//!     .await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// Configuration for LLM generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gpt-4o", "claude-sonnet-4-20250514")
    pub model: String,

    /// Sampling temperature; `None` leaves the provider default in place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 { 1024 }

impl GenerationOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: default_max_tokens(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason as reported by the provider
    pub finish_reason: Option<FinishReason>,
}

/// Token usage statistics
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other(String),
}

impl FinishReason {
    /// Normalize the provider's raw stop reason
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "stop" | "end_turn" | "stop_sequence" => FinishReason::Stop,
            "length" | "max_tokens" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            other => FinishReason::Other(other.to_string()),
        }
    }
}

/// Hosted providers the analyzer can dispatch to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Anthropic Messages API
    Anthropic,
    /// OpenAI Chat Completions API
    OpenAi,
}

impl ProviderKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "Claude",
            ProviderKind::OpenAi => "OpenAI",
        }
    }

    /// Generation defaults used for structured token analysis
    pub fn default_options(&self) -> GenerationOptions {
        match self {
            ProviderKind::Anthropic => GenerationOptions::new("claude-sonnet-4-20250514"),
            ProviderKind::OpenAi => GenerationOptions::new("gpt-4o").with_temperature(0.3),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider display name, used in logs and errors
    fn name(&self) -> &str;

    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;
}

/// Builds a provider for a given credential.
///
/// Credentials are supplied per call, so providers are constructed on demand
/// rather than held for the lifetime of the caller.
pub trait ProviderFactory: Send + Sync {
    fn build(&self, kind: ProviderKind, api_key: &str) -> Result<Box<dyn LlmProvider>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::new("gpt-4o");
        assert_eq!(opts.max_tokens, 1024);
        assert!(opts.temperature.is_none());
    }

    #[test]
    fn test_provider_defaults() {
        let claude = ProviderKind::Anthropic.default_options();
        assert_eq!(claude.model, "claude-sonnet-4-20250514");
        assert!(claude.temperature.is_none());

        let openai = ProviderKind::OpenAi.default_options();
        assert_eq!(openai.model, "gpt-4o");
        assert_eq!(openai.temperature, Some(0.3));
        assert_eq!(openai.max_tokens, 1024);
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(FinishReason::from_raw("end_turn"), FinishReason::Stop);
        assert_eq!(FinishReason::from_raw("max_tokens"), FinishReason::Length);
        assert_eq!(FinishReason::from_raw("length"), FinishReason::Length);
        assert_eq!(
            FinishReason::from_raw("tool_use"),
            FinishReason::Other("tool_use".into())
        );
    }

    #[test]
    fn test_usage_total() {
        assert_eq!(TokenUsage::new(100, 20).total_tokens, 120);
    }
}
