//! Auto-Training Driver
//!
//! Runs fetch → analyze → submit over a list of mints, reporting progress on
//! a channel. Stops early only when its cancellation token fires; the check
//! happens between mints and during the post-submission delay.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::ConfigSource;
use crate::error::Result;
use crate::market::{AnalysisPayload, MarketClient, SubmitResult};
use crate::orchestrator::Orchestrator;

/// Minimum pause between successful submissions
pub const MIN_SUBMIT_DELAY: Duration = Duration::from_secs(6);

/// Progress reported while a run is in flight
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TrainingEvent {
    Fetching { mint: String },
    Analyzing { mint: String },
    Submitting { mint: String },
    Done { mint: String, xp_earned: Option<u64> },
    Error { mint: String, message: String },
    Complete { total_xp: u64, tokens_analyzed: usize },
}

/// Totals for a finished run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSummary {
    pub total_xp: u64,
    pub tokens_analyzed: usize,
    pub cancelled: bool,
}

/// Batch driver over a market client and an orchestrator
#[derive(Clone)]
pub struct TrainingRun {
    market: Arc<dyn MarketClient>,
    orchestrator: Orchestrator,
    config: Arc<dyn ConfigSource>,
}

impl TrainingRun {
    pub fn new(
        market: Arc<dyn MarketClient>,
        orchestrator: Orchestrator,
        config: Arc<dyn ConfigSource>,
    ) -> Self {
        Self {
            market,
            orchestrator,
            config,
        }
    }

    /// Process `mints` in order. Dropped receivers never stop the run.
    pub async fn run(
        &self,
        mints: Vec<String>,
        cancel: CancellationToken,
        events: mpsc::Sender<TrainingEvent>,
    ) -> TrainingSummary {
        let mut summary = TrainingSummary::default();
        tracing::info!(tokens = mints.len(), "Auto-training started");

        for mint in mints {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            match self.process(&mint, &events).await {
                Ok(result) => {
                    let xp = result.xp_earned.unwrap_or(0);
                    summary.total_xp += xp;
                    summary.tokens_analyzed += 1;
                    if !result.ok {
                        tracing::warn!(mint = %mint, error = ?result.error, "Submission accepted with ok=false");
                    }
                    tracing::info!(mint = %mint, xp, "Token analyzed");
                    emit(&events, TrainingEvent::Done { mint, xp_earned: result.xp_earned }).await;

                    let delay = Duration::from_secs(self.config.load().analyze_interval)
                        .max(MIN_SUBMIT_DELAY);
                    tokio::select! {
                        () = cancel.cancelled() => {}
                        () = tokio::time::sleep(delay) => {}
                    }
                }
                Err(e) => {
                    tracing::warn!(mint = %mint, error = %e, "Training step failed");
                    emit(&events, TrainingEvent::Error { mint, message: e.to_string() }).await;
                }
            }
        }

        summary.cancelled |= cancel.is_cancelled();
        tracing::info!(
            total_xp = summary.total_xp,
            tokens_analyzed = summary.tokens_analyzed,
            cancelled = summary.cancelled,
            "Auto-training finished"
        );
        emit(
            &events,
            TrainingEvent::Complete {
                total_xp: summary.total_xp,
                tokens_analyzed: summary.tokens_analyzed,
            },
        )
        .await;

        summary
    }

    async fn process(&self, mint: &str, events: &mpsc::Sender<TrainingEvent>) -> Result<SubmitResult> {
        emit(events, TrainingEvent::Fetching { mint: mint.to_string() }).await;
        let snapshot = self.market.get_data_point(mint).await?;

        emit(events, TrainingEvent::Analyzing { mint: mint.to_string() }).await;
        let analysis = self.orchestrator.analyze(&snapshot).await;

        emit(events, TrainingEvent::Submitting { mint: mint.to_string() }).await;
        let mut payload = AnalysisPayload::new(&snapshot, &analysis);
        payload.mint = mint.to_string();
        self.market.submit_analysis(&payload).await
    }
}

async fn emit(events: &mpsc::Sender<TrainingEvent>, event: TrainingEvent) {
    if events.send(event).await.is_err() {
        tracing::trace!("Training event receiver dropped");
    }
}
