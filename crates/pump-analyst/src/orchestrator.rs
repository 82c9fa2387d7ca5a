//! Analysis Orchestrator
//!
//! Dispatches one analysis to the configured strategy:
//!
//! ```text
//! ┌──────────┐   Manual    ┌────────────┐
//! │ Snapshot │────────────▶│ Heuristics │──────────────────────┐
//! └────┬─────┘             └────────────┘                      ▼
//!      │ Claude / Codex    ┌──────────┐   text   ┌────────────┐ ┌────────────────┐
//!      └──────────────────▶│ Provider │─────────▶│ Reconciler │▶│ AnalysisResult │
//!                          └──────────┘          └────────────┘ └────────────────┘
//! ```
//!
//! Missing credentials and provider failures fall back to heuristics, so
//! [`Orchestrator::analyze`] always returns a valid result.

use std::sync::Arc;

use agent_core::{Message, ProviderFactory, ProviderKind};

use crate::config::{ConfigSource, Strategy};
use crate::heuristics::compute_defaults;
use crate::model::{AnalysisResult, Snapshot};
use crate::prompt::{SYSTEM_PROMPT, render_user_prompt};
use crate::reconcile::reconcile;

/// Strategy dispatcher with heuristic fallback
#[derive(Clone)]
pub struct Orchestrator {
    config: Arc<dyn ConfigSource>,
    providers: Arc<dyn ProviderFactory>,
}

impl Orchestrator {
    pub fn new(config: Arc<dyn ConfigSource>, providers: Arc<dyn ProviderFactory>) -> Self {
        Self { config, providers }
    }

    /// Analyze a snapshot. Never fails.
    pub async fn analyze(&self, snapshot: &Snapshot) -> AnalysisResult {
        let config = self.config.load();

        let kind = match config.strategy {
            Strategy::Manual => return compute_defaults(snapshot),
            Strategy::Claude => ProviderKind::Anthropic,
            Strategy::Codex => ProviderKind::OpenAi,
        };

        let Some(api_key) = config.credential(config.strategy) else {
            tracing::warn!(provider = %kind, "No {} API key configured, using heuristics", kind);
            return compute_defaults(snapshot);
        };

        match self.ask(kind, api_key, snapshot).await {
            Ok(text) => reconcile(&text, snapshot),
            Err(e) => {
                tracing::error!(provider = %kind, mint = %snapshot.mint, error = %e, "Provider analysis failed, using heuristics");
                compute_defaults(snapshot)
            }
        }
    }

    async fn ask(
        &self,
        kind: ProviderKind,
        api_key: &str,
        snapshot: &Snapshot,
    ) -> agent_core::Result<String> {
        let provider = self.providers.build(kind, api_key)?;
        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(render_user_prompt(snapshot)),
        ];

        let completion = provider.complete(&messages, &kind.default_options()).await?;
        tracing::debug!(
            provider = provider.name(),
            model = %completion.model,
            chars = completion.content.len(),
            "Provider analysis received"
        );
        Ok(completion.content)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use agent_core::{AgentError, Completion, GenerationOptions, LlmProvider};
    use async_trait::async_trait;
    use tracing::instrument::WithSubscriber;

    use crate::config::AgentConfig;
    use crate::model::{RiskFactor, Sentiment};

    /// Canned provider outcome
    #[derive(Clone)]
    pub(crate) enum Reply {
        Text(String),
        Fail(u16),
    }

    /// Records every build and request
    pub(crate) struct StubFactory {
        reply: Reply,
        pub(crate) builds: AtomicUsize,
        pub(crate) requests: Arc<Mutex<Vec<(String, Vec<Message>)>>>,
    }

    impl StubFactory {
        pub(crate) fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                builds: AtomicUsize::new(0),
                requests: Arc::new(Mutex::new(Vec::new())),
            })
        }

        pub(crate) fn build_count(&self) -> usize {
            self.builds.load(Ordering::SeqCst)
        }
    }

    struct StubProvider {
        reply: Reply,
        requests: Arc<Mutex<Vec<(String, Vec<Message>)>>>,
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "Stub"
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> agent_core::Result<Completion> {
            self.requests
                .lock()
                .unwrap()
                .push((options.model.clone(), messages.to_vec()));
            match &self.reply {
                Reply::Text(text) => Ok(Completion {
                    content: text.clone(),
                    model: options.model.clone(),
                    usage: None,
                    finish_reason: None,
                }),
                Reply::Fail(status) => Err(AgentError::from_status(*status, "upstream")),
            }
        }
    }

    impl ProviderFactory for StubFactory {
        fn build(&self, _kind: ProviderKind, _api_key: &str) -> agent_core::Result<Box<dyn LlmProvider>> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(StubProvider {
                reply: self.reply.clone(),
                requests: Arc::clone(&self.requests),
            }))
        }
    }

    struct FailingFactory;

    impl ProviderFactory for FailingFactory {
        fn build(&self, kind: ProviderKind, _api_key: &str) -> agent_core::Result<Box<dyn LlmProvider>> {
            Err(AgentError::Config(format!("{} client unavailable", kind)))
        }
    }

    fn orchestrator(config: AgentConfig, providers: Arc<dyn ProviderFactory>) -> Orchestrator {
        Orchestrator::new(Arc::new(move || config.clone()), providers)
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            price_change_24h: 3.0,
            liquidity: 40_000.0,
            volume_24h: 12_000.0,
            holder_count: 900.0,
            top10_holder_pct: 25.0,
            buys_24h: 80.0,
            sells_24h: 60.0,
            bonding_complete: true,
            ..Snapshot::new("Fwd3", "Fartcoin", "FART")
        }
    }

    fn claude(key: Option<&str>) -> AgentConfig {
        AgentConfig {
            strategy: Strategy::Claude,
            claude_api_key: key.map(String::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_manual_never_builds_provider() {
        let factory = StubFactory::new(Reply::Text("{}".into()));
        let config = AgentConfig {
            claude_api_key: Some("sk-ant".into()),
            ..Default::default()
        };

        let result = orchestrator(config, factory.clone()).analyze(&snapshot()).await;

        assert_eq!(result, compute_defaults(&snapshot()));
        assert_eq!(factory.build_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_skips_provider() {
        for key in [None, Some(""), Some("  ")] {
            let factory = StubFactory::new(Reply::Text("{}".into()));
            let result = orchestrator(claude(key), factory.clone()).analyze(&snapshot()).await;

            assert_eq!(result, compute_defaults(&snapshot()));
            assert_eq!(factory.build_count(), 0);
        }
    }

    /// Formatted log output shared with the test
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_missing_credential_logs_warning() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let captured = captured.clone();
                move || captured.clone()
            })
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let factory = StubFactory::new(Reply::Text("{}".into()));
        orchestrator(claude(None), factory)
            .analyze(&snapshot())
            .with_subscriber(subscriber)
            .await;

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"), "{}", logs);
        assert!(logs.contains("API key configured, using heuristics"), "{}", logs);
    }

    #[tokio::test]
    async fn test_manual_logs_nothing() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let captured = captured.clone();
                move || captured.clone()
            })
            .with_max_level(tracing::Level::WARN)
            .finish();

        orchestrator(AgentConfig::default(), StubFactory::new(Reply::Text("{}".into())))
            .analyze(&snapshot())
            .with_subscriber(subscriber)
            .await;

        assert!(captured.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_output_is_reconciled() {
        let factory = StubFactory::new(Reply::Text(
            "```json\n{\"sentiment\": \"bearish\", \"score\": 12.6, \"riskFactors\": [\"rug_pull_risk\"]}\n```".into(),
        ));

        let result = orchestrator(claude(Some("sk-ant")), factory.clone())
            .analyze(&snapshot())
            .await;

        assert_eq!(result.sentiment, Sentiment::Bearish);
        assert_eq!(result.score, 13);
        assert_eq!(result.risk_factors, vec![RiskFactor::RugPullRisk]);
        assert_eq!(result.summary, compute_defaults(&snapshot()).summary);
        assert_eq!(factory.build_count(), 1);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let factory = StubFactory::new(Reply::Text("{}".into()));
        let config = AgentConfig {
            strategy: Strategy::Codex,
            codex_api_key: Some("sk-oai".into()),
            ..Default::default()
        };

        orchestrator(config, factory.clone()).analyze(&snapshot()).await;

        let requests = factory.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (model, messages) = &requests[0];
        assert_eq!(model, "gpt-4o");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].content, render_user_prompt(&snapshot()));
    }

    #[tokio::test]
    async fn test_provider_failures_fall_back() {
        for status in [401, 429, 500, 503] {
            let factory = StubFactory::new(Reply::Fail(status));
            let result = orchestrator(claude(Some("sk-ant")), factory).analyze(&snapshot()).await;
            assert_eq!(result, compute_defaults(&snapshot()), "status {}", status);
        }

        let result = orchestrator(claude(Some("sk-ant")), Arc::new(FailingFactory))
            .analyze(&snapshot())
            .await;
        assert_eq!(result, compute_defaults(&snapshot()));
    }

    #[tokio::test]
    async fn test_config_read_per_call() {
        let factory = StubFactory::new(Reply::Text(r#"{"score": 99}"#.into()));
        let current = Arc::new(Mutex::new(AgentConfig::default()));
        let source = {
            let current = Arc::clone(&current);
            move || current.lock().unwrap().clone()
        };
        let orchestrator = Orchestrator::new(Arc::new(source), factory.clone());

        let first = orchestrator.analyze(&snapshot()).await;
        *current.lock().unwrap() = claude(Some("sk-ant"));
        let second = orchestrator.analyze(&snapshot()).await;

        assert_eq!(first.score, compute_defaults(&snapshot()).score);
        assert_eq!(second.score, 99);
        assert_eq!(factory.build_count(), 1);
    }
}
