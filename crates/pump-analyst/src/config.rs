//! Agent Configuration
//!
//! Which analysis strategy to run and the credentials it needs. Loaded from
//! the environment, held in memory by the host, and read once per analysis
//! through a [`ConfigSource`].

use agent_core::ProviderKind;
use serde::{Deserialize, Serialize};

/// Default seconds between auto-training submissions
pub const DEFAULT_ANALYZE_INTERVAL: u64 = 10;

/// Analysis strategy.
///
/// Unrecognised values map to `Manual` when a config is loaded, so the
/// orchestrator only ever sees these three variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Strategy {
    /// Heuristics only, no provider calls
    #[default]
    Manual,
    /// Anthropic Messages API
    Claude,
    /// OpenAI Chat Completions API
    Codex,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Manual => "manual",
            Strategy::Claude => "claude",
            Strategy::Codex => "codex",
        }
    }

    /// Hosted provider backing this strategy
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            Strategy::Manual => None,
            Strategy::Claude => Some(ProviderKind::Anthropic),
            Strategy::Codex => Some(ProviderKind::OpenAi),
        }
    }
}

impl From<&str> for Strategy {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "claude" => Strategy::Claude,
            "codex" => Strategy::Codex,
            _ => Strategy::Manual,
        }
    }
}

impl From<String> for Strategy {
    fn from(raw: String) -> Self {
        Strategy::from(raw.as_str())
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// Pump Studio platform API key
    pub api_key: String,

    #[serde(rename = "orchestrator")]
    pub strategy: Strategy,

    /// Anthropic API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claude_api_key: Option<String>,

    /// OpenAI API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codex_api_key: Option<String>,

    pub auto_analyze: bool,

    /// Seconds between auto-training submissions
    pub analyze_interval: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            strategy: Strategy::Manual,
            claude_api_key: None,
            codex_api_key: None,
            auto_analyze: false,
            analyze_interval: DEFAULT_ANALYZE_INTERVAL,
        }
    }
}

impl AgentConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            api_key: var("PUMP_STUDIO_API_KEY").unwrap_or_default(),
            strategy: var("ANALYST_STRATEGY").map(Strategy::from).unwrap_or_default(),
            claude_api_key: var("ANTHROPIC_API_KEY"),
            codex_api_key: var("OPENAI_API_KEY"),
            auto_analyze: var("AUTO_ANALYZE")
                .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")),
            analyze_interval: var("ANALYZE_INTERVAL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_ANALYZE_INTERVAL),
        }
    }

    /// Credential for the given strategy; blank keys count as absent
    pub fn credential(&self, strategy: Strategy) -> Option<&str> {
        let key = match strategy {
            Strategy::Manual => return None,
            Strategy::Claude => self.claude_api_key.as_deref(),
            Strategy::Codex => self.codex_api_key.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }

    /// Apply a partial update
    pub fn merge(&mut self, update: ConfigUpdate) {
        if let Some(api_key) = update.api_key {
            self.api_key = api_key;
        }
        if let Some(strategy) = update.strategy {
            self.strategy = strategy;
        }
        if let Some(key) = update.claude_api_key {
            self.claude_api_key = Some(key);
        }
        if let Some(key) = update.codex_api_key {
            self.codex_api_key = Some(key);
        }
        if let Some(auto) = update.auto_analyze {
            self.auto_analyze = auto;
        }
        if let Some(interval) = update.analyze_interval {
            self.analyze_interval = interval;
        }
    }

    /// Copy with every credential masked, safe to return to clients
    pub fn redacted(&self) -> Self {
        Self {
            api_key: mask(&self.api_key),
            claude_api_key: self.claude_api_key.as_deref().map(mask),
            codex_api_key: self.codex_api_key.as_deref().map(mask),
            ..self.clone()
        }
    }
}

fn mask(secret: &str) -> String {
    let secret = secret.trim();
    if secret.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".into();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

/// Partial configuration update; absent fields are left unchanged
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    pub api_key: Option<String>,
    #[serde(rename = "orchestrator")]
    pub strategy: Option<Strategy>,
    pub claude_api_key: Option<String>,
    pub codex_api_key: Option<String>,
    pub auto_analyze: Option<bool>,
    pub analyze_interval: Option<u64>,
}

/// Supplies the current configuration, read once per analysis
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> AgentConfig;
}

impl<F> ConfigSource for F
where
    F: Fn() -> AgentConfig + Send + Sync,
{
    fn load(&self) -> AgentConfig {
        self()
    }
}
