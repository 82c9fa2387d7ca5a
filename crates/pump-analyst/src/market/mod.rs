//! Market API Integration
//!
//! Client abstraction for the Pump Studio REST API.

mod mock;
mod pump_studio;
mod types;

pub use mock::MockMarketClient;
pub use pump_studio::{DEFAULT_BASE_URL, PumpStudioClient};
pub use types::{
    AnalysisPayload, AnalysisStats, LeaderboardEntry, MarketToken, QuantFields, SnapshotRecord,
    SubmitResult,
};

use async_trait::async_trait;

use crate::error::Result;
use crate::model::Snapshot;

/// Market data and scoring service (Strategy pattern)
///
/// `PumpStudioClient` talks to the live API; `MockMarketClient` serves
/// static data for tests and offline runs.
#[async_trait]
pub trait MarketClient: Send + Sync {
    /// List tokens for a market tab ("all", "live", ...)
    async fn get_market(&self, tab: &str, limit: u32) -> Result<Vec<MarketToken>>;

    /// Current snapshot for one mint
    async fn get_data_point(&self, mint: &str) -> Result<Snapshot>;

    /// Community analysis totals and leaderboard
    async fn get_analysis_stats(&self, limit: u32) -> Result<AnalysisStats>;

    /// Submit an analysis for scoring
    async fn submit_analysis(&self, payload: &AnalysisPayload) -> Result<SubmitResult>;

    /// Free-text chat context for a mint; empty when the service has none
    async fn get_context(&self, mint: &str) -> Result<String>;

    /// Client name
    fn name(&self) -> &str;
}
