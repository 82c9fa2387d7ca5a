//! Provider factory backed by the hosted HTTP providers.

use agent_core::{
    error::{AgentError, Result},
    provider::{LlmProvider, ProviderFactory, ProviderKind},
};
use reqwest::Client;

use crate::anthropic::{AnthropicConfig, AnthropicProvider};
use crate::http::build_client;
use crate::openai::{OpenAiConfig, OpenAiProvider};

/// Builds Anthropic/OpenAI providers that share one connection pool
#[derive(Clone)]
pub struct HttpProviderFactory {
    client: Client,
    anthropic: AnthropicConfig,
    openai: OpenAiConfig,
}

impl HttpProviderFactory {
    pub fn new(anthropic: AnthropicConfig, openai: OpenAiConfig) -> Result<Self> {
        let timeout = anthropic.timeout().max(openai.timeout());
        Ok(Self {
            client: build_client(timeout)?,
            anthropic,
            openai,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(AnthropicConfig::from_env(), OpenAiConfig::from_env())
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn build(&self, kind: ProviderKind, api_key: &str) -> Result<Box<dyn LlmProvider>> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AgentError::Config(format!("{} API key is empty", kind)));
        }

        let provider: Box<dyn LlmProvider> = match kind {
            ProviderKind::Anthropic => Box::new(AnthropicProvider::with_client(
                self.client.clone(),
                self.anthropic.clone(),
                api_key,
            )),
            ProviderKind::OpenAi => Box::new(OpenAiProvider::with_client(
                self.client.clone(),
                self.openai.clone(),
                api_key,
            )),
        };

        Ok(provider)
    }
}
