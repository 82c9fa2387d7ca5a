//! # agent-core
//!
//! Provider-agnostic LLM abstraction shared by the analyzer and its runtimes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Caller                               │
//! │  ┌──────────────────┐        ┌─────────────────────────┐  │
//! │  │ ProviderFactory  │──────▶ │  LlmProvider (Strategy) │  │
//! │  │ (kind, api key)  │        │  Anthropic | OpenAI     │  │
//! │  └──────────────────┘        └─────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between Anthropic, OpenAI, or a
//! test stub without changing caller logic.

pub mod error;
pub mod message;
pub mod provider;

pub use error::{AgentError, Result};
pub use message::{Message, Role};
pub use provider::{
    Completion, GenerationOptions, LlmProvider, ProviderFactory, ProviderKind, TokenUsage,
};
