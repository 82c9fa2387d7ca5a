//! Pump Studio wire records.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::{
    AnalysisResult, HolderConcentration, LiquidityDepth, RiskFactor, RiskLevel, Sentiment,
    Snapshot, TrendDirection, VolumeProfile,
};

/// Market listing entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketToken {
    pub mint: String,
    pub name: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_market_cap: Option<f64>,
    #[serde(rename = "priceUsd", default, skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_currently_live: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_timestamp: Option<i64>,
}

/// Market list envelope; the service has used both `tokens` and `items`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MarketEnvelope {
    #[serde(default)]
    tokens: Option<Vec<MarketToken>>,
    #[serde(default)]
    items: Option<Vec<MarketToken>>,
}

impl MarketEnvelope {
    pub(crate) fn into_tokens(self) -> Vec<MarketToken> {
        self.tokens.or(self.items).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub mint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sentiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_score: Option<f64>,
}

/// Community analysis progress
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub ok: bool,
    pub total_analyses: u64,
    pub unique_tokens: u64,
    pub goal: u64,
    pub progress: f64,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Outcome of an analysis submission
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp_earned: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deviation_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Numeric market state at analysis time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub price_usd: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub liquidity: f64,
    pub holder_count: f64,
    pub top10_holder_pct: f64,
    pub buys_24h: f64,
    pub sells_24h: f64,
    pub bonding_progress: f64,
    /// Unix milliseconds
    pub snapshot_at: i64,
}

impl SnapshotRecord {
    pub fn capture(s: &Snapshot) -> Self {
        Self {
            price_usd: s.price_usd,
            market_cap: s.market_cap,
            volume_24h: s.volume_24h,
            liquidity: s.liquidity,
            holder_count: s.holder_count,
            top10_holder_pct: s.top10_holder_pct,
            buys_24h: s.buys_24h,
            sells_24h: s.sells_24h,
            bonding_progress: s.bonding_progress,
            snapshot_at: Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantFields {
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub buy_pressure: u8,
    pub volatility_score: u8,
    pub liquidity_depth: LiquidityDepth,
    pub holder_concentration: HolderConcentration,
    pub trend_direction: TrendDirection,
    pub volume_profile: VolumeProfile,
}

/// Body of `POST /api/v1/analysis/submit`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub mint: String,
    pub sentiment: Sentiment,
    pub score: u8,
    pub summary: String,
    pub snapshot: SnapshotRecord,
    pub quant: QuantFields,
}

impl AnalysisPayload {
    pub fn new(snapshot: &Snapshot, analysis: &AnalysisResult) -> Self {
        Self {
            mint: snapshot.mint.clone(),
            sentiment: analysis.sentiment,
            score: analysis.score,
            summary: analysis.summary.clone(),
            snapshot: SnapshotRecord::capture(snapshot),
            quant: QuantFields {
                risk_level: analysis.risk_level,
                risk_factors: analysis.risk_factors.clone(),
                buy_pressure: analysis.buy_pressure,
                volatility_score: analysis.volatility_score,
                liquidity_depth: analysis.liquidity_depth,
                holder_concentration: analysis.holder_concentration,
                trend_direction: analysis.trend_direction,
                volume_profile: analysis.volume_profile,
            },
        }
    }
}
