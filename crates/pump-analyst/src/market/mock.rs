//! Mock Market Client
//!
//! For testing and offline runs. Serves static data points and records
//! every submission.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::MarketClient;
use super::types::{AnalysisPayload, AnalysisStats, LeaderboardEntry, MarketToken, SubmitResult};
use crate::error::{AnalystError, Result};
use crate::model::Snapshot;

/// Mock market with a fixed set of tokens
pub struct MockMarketClient {
    snapshots: HashMap<String, Snapshot>,
    xp_per_submission: u64,
    submitted: Mutex<Vec<AnalysisPayload>>,
}

impl Default for MockMarketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketClient {
    /// Mock seeded with a few representative tokens
    pub fn new() -> Self {
        Self::with_snapshots(seed_snapshots())
    }

    pub fn with_snapshots(snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        Self {
            snapshots: snapshots
                .into_iter()
                .map(|s| (s.mint.clone(), s))
                .collect(),
            xp_per_submission: 10,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_xp(mut self, xp: u64) -> Self {
        self.xp_per_submission = xp;
        self
    }

    /// Payloads received so far, in submission order
    pub fn submissions(&self) -> Vec<AnalysisPayload> {
        self.submitted
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn lookup(&self, mint: &str) -> Result<&Snapshot> {
        self.snapshots
            .get(mint)
            .ok_or_else(|| AnalystError::UnknownMint(mint.to_string()))
    }
}

fn seed_snapshots() -> Vec<Snapshot> {
    vec![
        // Graduated, deep liquidity, well distributed
        Snapshot {
            price_usd: 0.021,
            market_cap: 21_000_000.0,
            volume_24h: 3_400_000.0,
            liquidity: 1_250_000.0,
            holder_count: 48_000.0,
            top10_holder_pct: 18.5,
            buys_24h: 5_200.0,
            sells_24h: 4_100.0,
            bonding_progress: 100.0,
            price_change_24h: 6.4,
            bonding_complete: true,
            is_currently_live: false,
            description: Some("Community meme with deep pools".into()),
            ..Snapshot::new("MockMint1111111111111111111111111111111111", "Mock Cat", "MCAT")
        },
        // Fresh launch on the bonding curve
        Snapshot {
            price_usd: 0.000_008,
            market_cap: 8_000.0,
            volume_24h: 22_000.0,
            liquidity: 4_200.0,
            holder_count: 38.0,
            top10_holder_pct: 71.0,
            buys_24h: 310.0,
            sells_24h: 40.0,
            bonding_progress: 27.5,
            price_change_24h: 145.0,
            is_currently_live: true,
            ..Snapshot::new("MockMint2222222222222222222222222222222222", "Rocket Frog", "RFROG")
        },
        // Abandoned
        Snapshot {
            price_usd: 0.000_001,
            market_cap: 900.0,
            volume_24h: 12.0,
            liquidity: 300.0,
            holder_count: 9.0,
            top10_holder_pct: 92.0,
            buys_24h: 0.0,
            sells_24h: 3.0,
            bonding_progress: 4.0,
            price_change_24h: -38.0,
            ..Snapshot::new("MockMint3333333333333333333333333333333333", "Ghost Coin", "GHOST")
        },
    ]
}

#[async_trait]
impl MarketClient for MockMarketClient {
    async fn get_market(&self, tab: &str, limit: u32) -> Result<Vec<MarketToken>> {
        let mut tokens: Vec<MarketToken> = self
            .snapshots
            .values()
            .filter(|s| tab != "live" || s.is_currently_live)
            .map(|s| MarketToken {
                mint: s.mint.clone(),
                name: s.name.clone(),
                symbol: s.symbol.clone(),
                image_uri: s.image_uri.clone(),
                usd_market_cap: Some(s.market_cap),
                price_usd: Some(s.price_usd),
                is_currently_live: Some(s.is_currently_live),
                complete: Some(s.bonding_complete),
                created_timestamp: None,
            })
            .collect();

        tokens.sort_by(|a, b| {
            b.usd_market_cap
                .partial_cmp(&a.usd_market_cap)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        tokens.truncate(limit as usize);
        Ok(tokens)
    }

    async fn get_data_point(&self, mint: &str) -> Result<Snapshot> {
        self.lookup(mint).cloned()
    }

    async fn get_analysis_stats(&self, limit: u32) -> Result<AnalysisStats> {
        let submitted = self.submissions();

        let mut leaderboard: Vec<LeaderboardEntry> = Vec::new();
        for payload in &submitted {
            match leaderboard.iter_mut().find(|e| e.mint == payload.mint) {
                Some(entry) => {
                    entry.count += 1;
                    entry.last_sentiment = Some(payload.sentiment.to_string());
                    entry.last_score = Some(f64::from(payload.score));
                }
                None => {
                    let token = self.snapshots.get(&payload.mint);
                    leaderboard.push(LeaderboardEntry {
                        mint: payload.mint.clone(),
                        name: token.map(|t| t.name.clone()),
                        symbol: token.map(|t| t.symbol.clone()),
                        image: token.and_then(|t| t.image_uri.clone()),
                        count: 1,
                        last_sentiment: Some(payload.sentiment.to_string()),
                        last_score: Some(f64::from(payload.score)),
                    });
                }
            }
        }
        leaderboard.sort_by(|a, b| b.count.cmp(&a.count));

        let unique_tokens = leaderboard.len() as u64;
        leaderboard.truncate(limit as usize);

        let total = submitted.len() as u64;
        let goal = 1_000;
        Ok(AnalysisStats {
            ok: true,
            total_analyses: total,
            unique_tokens,
            goal,
            progress: total as f64 / goal as f64 * 100.0,
            leaderboard,
        })
    }

    async fn submit_analysis(&self, payload: &AnalysisPayload) -> Result<SubmitResult> {
        self.lookup(&payload.mint)?;

        let total = {
            let mut submitted = self
                .submitted
                .lock()
                .map_err(|_| AnalystError::Config("mock submission log poisoned".into()))?;
            submitted.push(payload.clone());
            submitted.len() as u64
        };

        Ok(SubmitResult {
            ok: true,
            xp_earned: Some(self.xp_per_submission),
            xp_total: Some(self.xp_per_submission * total),
            analysis_id: Some(format!("mock-{}", total)),
            validated: Some(true),
            ..Default::default()
        })
    }

    async fn get_context(&self, mint: &str) -> Result<String> {
        let s = self.lookup(mint)?;
        Ok(format!(
            "{} ({}) holders={} top10={}%",
            s.name, s.symbol, s.holder_count, s.top10_holder_pct
        ))
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}
