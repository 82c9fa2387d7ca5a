//! HTTP Handlers

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use pump_analyst::{
    AgentConfig, AnalysisPayload, AnalysisResult, AnalystError, ConfigUpdate, Snapshot,
    market::{AnalysisStats, MarketToken, SubmitResult},
    training::TrainingSummary,
};

use crate::state::{AppState, LoggedEvent};

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub market: String,
    pub strategy: String,
    pub training: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

/// Map a market client failure to an HTTP error
fn upstream(e: AnalystError) -> ApiError {
    tracing::error!("Pump Studio error: {}", e);
    let status = match e {
        AnalystError::UnknownMint(_) => StatusCode::NOT_FOUND,
        AnalystError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    };
    api_error(status, e.code(), e.to_string())
}

fn require_mint(mint: Option<String>) -> Result<String, ApiError> {
    mint.map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "MISSING_MINT", "mint is required"))
}

#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MarketResponse {
    pub tokens: Vec<MarketToken>,
}

#[derive(Debug, Deserialize)]
pub struct MintQuery {
    #[serde(default)]
    pub mint: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPointResponse {
    pub data_point: Snapshot,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: AnalysisStats,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub result: SubmitResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub data_point: Snapshot,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config: AgentConfig,
}

#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct StartTrainingRequest {
    pub mints: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatusResponse {
    pub running: bool,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub queued: usize,
    pub last_summary: Option<TrainingSummary>,
    pub events: Vec<LoggedEvent>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let training = state.trainer.read().await.is_running();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        market: state.market.name().to_string(),
        strategy: state.current_config().strategy.to_string(),
        training,
    })
}

pub async fn get_market(
    State(state): State<AppState>,
    Query(query): Query<MarketQuery>,
) -> Result<Json<MarketResponse>, ApiError> {
    let tab = query.tab.as_deref().unwrap_or("all");
    let limit = query.limit.unwrap_or(50);

    let tokens = state.market.get_market(tab, limit).await.map_err(upstream)?;
    Ok(Json(MarketResponse { tokens }))
}

pub async fn get_data_point(
    State(state): State<AppState>,
    Query(query): Query<MintQuery>,
) -> Result<Json<DataPointResponse>, ApiError> {
    let mint = require_mint(query.mint)?;
    let data_point = state.market.get_data_point(&mint).await.map_err(upstream)?;
    Ok(Json(DataPointResponse { data_point }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state
        .market
        .get_analysis_stats(query.limit.unwrap_or(10))
        .await
        .map_err(upstream)?;
    Ok(Json(StatsResponse { stats }))
}

pub async fn submit_analysis(
    State(state): State<AppState>,
    Json(payload): Json<AnalysisPayload>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let result = state
        .market
        .submit_analysis(&payload)
        .await
        .map_err(upstream)?;
    Ok(Json(SubmitResponse { result }))
}

/// Run the configured strategy on a caller-supplied snapshot
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let result = state.orchestrator.analyze(&request.data_point).await;
    Json(AnalyzeResponse { result })
}

pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        config: state.current_config().redacted(),
    })
}

/// Partial update; unspecified fields keep their values
pub async fn put_config(
    State(state): State<AppState>,
    Json(update): Json<ConfigUpdate>,
) -> Json<ConfigResponse> {
    let config = state.update_config(update);
    tracing::info!(strategy = %config.strategy, interval = config.analyze_interval, "Config updated");
    Json(ConfigResponse {
        config: config.redacted(),
    })
}

pub async fn get_context(
    State(state): State<AppState>,
    Query(query): Query<MintQuery>,
) -> Result<Json<ContextResponse>, ApiError> {
    let mint = require_mint(query.mint)?;
    let context = state.market.get_context(&mint).await.map_err(upstream)?;
    Ok(Json(ContextResponse { context }))
}

pub async fn training_status(State(state): State<AppState>) -> Json<TrainingStatusResponse> {
    let status = state.trainer.read().await;
    Json(TrainingStatusResponse {
        running: status.is_running(),
        started_at: status.started_at,
        queued: status.queued,
        last_summary: status.last_summary,
        events: status.events.iter().cloned().collect(),
    })
}

/// Start an auto-training run in the background
pub async fn start_training(
    State(state): State<AppState>,
    Json(request): Json<StartTrainingRequest>,
) -> Result<StatusCode, ApiError> {
    let mints: Vec<String> = request
        .mints
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();
    if mints.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "NO_MINTS",
            "at least one mint is required",
        ));
    }

    let cancel = CancellationToken::new();
    {
        let mut status = state.trainer.write().await;
        if status.is_running() {
            return Err(api_error(
                StatusCode::CONFLICT,
                "TRAINING_RUNNING",
                "auto-training is already running",
            ));
        }
        status.begin(cancel.clone(), mints.len());
    }

    let (tx, mut rx) = mpsc::channel(64);
    let run = state.training.clone();
    let trainer = state.trainer.clone();

    tokio::spawn(async move {
        let recorder = {
            let trainer = trainer.clone();
            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    trainer.write().await.record(event);
                }
            })
        };

        let summary = run.run(mints, cancel, tx).await;
        if let Err(e) = recorder.await {
            tracing::error!("Training event recorder failed: {}", e);
        }
        trainer.write().await.finish(summary);
    });

    Ok(StatusCode::ACCEPTED)
}

pub async fn stop_training(State(state): State<AppState>) -> StatusCode {
    if state.trainer.read().await.stop() {
        tracing::info!("Auto-training stop requested");
        StatusCode::ACCEPTED
    } else {
        StatusCode::NO_CONTENT
    }
}
