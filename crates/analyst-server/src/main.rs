//! pump-analyst HTTP Server
//!
//! Axum-based host for the analyst: proxies the Pump Studio market API,
//! runs one-off analyses and drives auto-training in the background.

mod handlers;
mod state;

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_runtime::HttpProviderFactory;
use pump_analyst::{
    AgentConfig, MarketClient, MockMarketClient, PumpStudioClient, market::DEFAULT_BASE_URL,
};

use crate::handlers::{
    analyze, get_config, get_context, get_data_point, get_market, get_stats, health_check,
    put_config, start_training, stop_training, submit_analysis, training_status,
};
use crate::state::{AppState, config_source};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = AgentConfig::from_env();
    tracing::info!("Strategy: {}", config.strategy);
    if config.api_key.trim().is_empty() {
        tracing::warn!("⚠ PUMP_STUDIO_API_KEY not set - submissions will be anonymous");
    }
    if config.strategy.provider().is_some() && config.credential(config.strategy).is_none() {
        tracing::warn!("⚠ No key for {} - analyses will use heuristics", config.strategy);
    }
    let config = Arc::new(RwLock::new(config));

    // Initialize market client
    let market: Arc<dyn MarketClient> = if std::env::var("PUMP_STUDIO_OFFLINE").is_ok() {
        tracing::warn!("⚠ PUMP_STUDIO_OFFLINE set - serving mock market data");
        Arc::new(MockMarketClient::new())
    } else {
        let base_url =
            std::env::var("PUMP_STUDIO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let client = PumpStudioClient::new(base_url, config_source(&config))?;
        tracing::info!("✓ Pump Studio at {}", client.base_url());
        Arc::new(client)
    };

    // Initialize LLM providers
    let providers = Arc::new(HttpProviderFactory::from_env()?);

    let state = AppState::new(config, market, providers);
    let app = router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 pump-analyst server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                - Health check");
    tracing::info!("  GET  /api/market            - Token list");
    tracing::info!("  GET  /api/datapoint         - Snapshot for a mint");
    tracing::info!("  GET  /api/context           - Chat context for a mint");
    tracing::info!("  GET  /api/stats             - Analysis leaderboard");
    tracing::info!("  POST /api/analyze           - Analyze a snapshot");
    tracing::info!("  POST /api/analysis/submit   - Submit an analysis");
    tracing::info!("  GET  /api/config            - Read config (redacted)");
    tracing::info!("  PUT  /api/config            - Update config");
    tracing::info!("  GET  /api/training          - Auto-training status");
    tracing::info!("  POST /api/training/start    - Start auto-training");
    tracing::info!("  POST /api/training/stop     - Stop auto-training");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_check))
        // Market proxy
        .route("/api/market", get(get_market))
        .route("/api/datapoint", get(get_data_point))
        .route("/api/context", get(get_context))
        .route("/api/stats", get(get_stats))
        .route("/api/analysis/submit", post(submit_analysis))
        // Analyst
        .route("/api/analyze", post(analyze))
        .route("/api/config", get(get_config).put(put_config))
        // Auto-training
        .route("/api/training", get(training_status))
        .route("/api/training/start", post(start_training))
        .route("/api/training/stop", post(stop_training))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
