//! # agent-runtime
//!
//! Hosted LLM providers for the pump analyst.
//!
//! ## Providers
//!
//! - **Anthropic**: Claude via the Messages API
//! - **OpenAI**: GPT via the Chat Completions API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::HttpProviderFactory;
//! use agent_core::{ProviderFactory, ProviderKind};
//!
//! let factory = HttpProviderFactory::from_env()?;
//! let provider = factory.build(ProviderKind::Anthropic, &api_key)?;
//! ```

pub mod anthropic;
pub mod factory;
mod http;
pub mod openai;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
pub use factory::HttpProviderFactory;
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use agent_core::{
    AgentError, GenerationOptions, LlmProvider, Message, ProviderFactory, ProviderKind, Result, Role,
};
