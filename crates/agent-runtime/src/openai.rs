//! OpenAI LLM Provider
//!
//! Implementation of `LlmProvider` for the OpenAI Chat Completions API.

use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::Message,
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::http::read_body;

/// OpenAI provider configuration
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            timeout_secs: 60,
        }
    }
}

impl OpenAiConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com".into());

        Self {
            base_url,
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// OpenAI Chat Completions provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
    api_key: String,
}

impl OpenAiProvider {
    /// Create a provider sharing an existing HTTP client
    pub fn with_client(client: Client, config: OpenAiConfig, api_key: impl Into<String>) -> Self {
        Self {
            client,
            config,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(messages: &'a [Message], options: &'a GenerationOptions) -> ChatRequest<'a> {
        ChatRequest {
            model: &options.model,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }

    /// Take the first choice's message content
    fn convert_completion(response: ChatResponse, model: &str) -> Result<Completion> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::EmptyCompletion("OpenAI".into()))?;

        let content = choice
            .message
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AgentError::EmptyCompletion("OpenAI".into()))?;

        Ok(Completion {
            content,
            model: response.model.unwrap_or_else(|| model.to_string()),
            usage: response
                .usage
                .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens)),
            finish_reason: choice.finish_reason.as_deref().map(FinishReason::from_raw),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
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
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await;

        let body = read_body(response, self.name()).await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;

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
struct ChatRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::ProviderKind;

    #[test]
    fn test_request_keeps_system_message_inline() {
        let messages = vec![Message::system("Return JSON."), Message::user("Analyze POPCAT")];
        let options = ProviderKind::OpenAi.default_options();

        let json = serde_json::to_value(OpenAiProvider::build_request(&messages, &options)).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 1024);
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Analyze POPCAT");
    }

    #[test]
    fn test_first_choice_content() {
        let body = r#"{
            "model": "gpt-4o-2024-08-06",
            "choices": [
                {"message": {"role": "assistant", "content": "{\"score\": 42}"}, "finish_reason": "stop"},
                {"message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 250, "completion_tokens": 60, "total_tokens": 310}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let completion = OpenAiProvider::convert_completion(parsed, "gpt-4o").unwrap();

        assert_eq!(completion.content, "{\"score\": 42}");
        assert_eq!(completion.model, "gpt-4o-2024-08-06");
        assert_eq!(completion.usage.unwrap().total_tokens, 310);
    }

    #[test]
    fn test_missing_content_is_error() {
        for body in [
            r#"{"choices": []}"#,
            r#"{"choices": [{"message": {"content": null}}]}"#,
            r#"{"choices": [{"message": {"content": ""}}]}"#,
            r#"{"choices": [{}]}"#,
        ] {
            let parsed: ChatResponse = serde_json::from_str(body).unwrap();
            let result = OpenAiProvider::convert_completion(parsed, "gpt-4o");
            assert!(matches!(result, Err(AgentError::EmptyCompletion(_))), "{}", body);
        }
    }
}
