//! Application State

use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use agent_core::ProviderFactory;
use pump_analyst::{
    AgentConfig, ConfigSource, ConfigUpdate, MarketClient, Orchestrator, TrainingEvent,
    TrainingRun, TrainingSummary,
};

/// Training events kept for `GET /api/training`
pub const EVENT_HISTORY: usize = 100;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// In-memory agent configuration, seeded from the environment
    pub config: Arc<RwLock<AgentConfig>>,

    /// Pump Studio client (live or mock)
    pub market: Arc<dyn MarketClient>,

    /// Strategy dispatcher for one-off analyses
    pub orchestrator: Orchestrator,

    /// Batch driver for auto-training
    pub training: TrainingRun,

    /// Status of the current or last auto-training run
    pub trainer: Arc<tokio::sync::RwLock<TrainerStatus>>,
}

impl AppState {
    pub fn new(
        config: Arc<RwLock<AgentConfig>>,
        market: Arc<dyn MarketClient>,
        providers: Arc<dyn ProviderFactory>,
    ) -> Self {
        let source = config_source(&config);
        let orchestrator = Orchestrator::new(Arc::clone(&source), providers);
        let training = TrainingRun::new(Arc::clone(&market), orchestrator.clone(), source);

        Self {
            config,
            market,
            orchestrator,
            training,
            trainer: Arc::new(tokio::sync::RwLock::new(TrainerStatus::default())),
        }
    }

    pub fn current_config(&self) -> AgentConfig {
        read_config(&self.config)
    }

    pub fn update_config(&self, update: ConfigUpdate) -> AgentConfig {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        config.merge(update);
        config.clone()
    }
}

/// Readers never fail: a poisoned lock still holds the last written config
pub fn read_config(config: &RwLock<AgentConfig>) -> AgentConfig {
    config
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Config accessor shared by the orchestrator, trainer and market client
pub fn config_source(config: &Arc<RwLock<AgentConfig>>) -> Arc<dyn ConfigSource> {
    let config = Arc::clone(config);
    Arc::new(move || read_config(&config))
}

/// A training event with its arrival time
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: TrainingEvent,
}

/// Auto-training bookkeeping
#[derive(Debug, Default)]
pub struct TrainerStatus {
    pub cancel: Option<CancellationToken>,
    pub started_at: Option<DateTime<Utc>>,
    pub queued: usize,
    pub events: VecDeque<LoggedEvent>,
    pub last_summary: Option<TrainingSummary>,
}

impl TrainerStatus {
    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }

    /// Reset for a new run
    pub fn begin(&mut self, cancel: CancellationToken, queued: usize) {
        self.cancel = Some(cancel);
        self.started_at = Some(Utc::now());
        self.queued = queued;
        self.events.clear();
        self.last_summary = None;
    }

    pub fn record(&mut self, event: TrainingEvent) {
        if self.events.len() == EVENT_HISTORY {
            self.events.pop_front();
        }
        self.events.push_back(LoggedEvent {
            at: Utc::now(),
            event,
        });
    }

    pub fn finish(&mut self, summary: TrainingSummary) {
        self.cancel = None;
        self.last_summary = Some(summary);
    }

    /// Signal the running loop to stop; returns false when idle
    pub fn stop(&self) -> bool {
        match &self.cancel {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}
