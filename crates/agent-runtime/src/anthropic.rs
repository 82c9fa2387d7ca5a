//! Anthropic LLM Provider
//!
//! Implementation of `LlmProvider` for the Anthropic Messages API.

use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{split_system, Message},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::http::read_body;

/// Anthropic provider configuration
#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    /// API base URL
    pub base_url: String,

    /// Value sent in the `anthropic-version` header
    pub api_version: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".into(),
            api_version: "2023-06-01".into(),
            timeout_secs: 60,
        }
    }
}

impl AnthropicConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com".into());

        Self {
            base_url,
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    client: Client,
    config: AnthropicConfig,
    api_key: String,
}

impl AnthropicProvider {
    /// Create a provider sharing an existing HTTP client
    pub fn with_client(client: Client, config: AnthropicConfig, api_key: impl Into<String>) -> Self {
        Self {
            client,
            config,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the Messages API request body
    fn build_request<'a>(messages: &'a [Message], options: &'a GenerationOptions) -> MessagesRequest<'a> {
        let (system, turns) = split_system(messages);

        MessagesRequest {
            model: &options.model,
            max_tokens: options.max_tokens,
            system,
            temperature: options.temperature,
            messages: turns
                .into_iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }

    /// Convert the Messages API response into a completion
    fn convert_completion(response: MessagesResponse, model: &str) -> Result<Completion> {
        if response.content.is_empty() {
            return Err(AgentError::EmptyCompletion("Claude".into()));
        }

        let texts: Vec<String> = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();

        if texts.is_empty() {
            return Err(AgentError::EmptyCompletion("Claude".into()));
        }

        Ok(Completion {
            content: texts.concat(),
            model: response.model.unwrap_or_else(|| model.to_string()),
            usage: response
                .usage
                .map(|u| TokenUsage::new(u.input_tokens, u.output_tokens)),
            finish_reason: response.stop_reason.as_deref().map(FinishReason::from_raw),
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Claude"
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = Self::build_request(messages, options);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&request)
            .send()
            .await;

        let body = read_body(response, self.name()).await?;
        let parsed: MessagesResponse = serde_json::from_str(&body)?;

        let completion = Self::convert_completion(parsed, &options.model)?;
        if let Some(usage) = &completion.usage {
            tracing::debug!(
                provider = self.name(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion received"
            );
        }
        Ok(completion)
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}
