//! Heuristic Engine
//!
//! Deterministic derivation of a complete [`AnalysisResult`] from a
//! [`Snapshot`]. Used directly by the manual strategy and as the field-level
//! fallback whenever provider output is missing or invalid.

mod rules;
mod summary;

pub use rules::{
    buy_pressure, holder_concentration, liquidity_depth, risk_factors, risk_level, score,
    sentiment, trend_direction, volatility_score, volume_profile,
};
pub use summary::build_summary;

use crate::model::{AnalysisResult, Snapshot};

/// Compute the full heuristic analysis. Total: never fails, never panics.
pub fn compute_defaults(s: &Snapshot) -> AnalysisResult {
    AnalysisResult {
        sentiment: sentiment(s),
        score: score(s),
        summary: build_summary(s),
        risk_level: risk_level(s),
        risk_factors: risk_factors(s),
        buy_pressure: buy_pressure(s),
        volatility_score: volatility_score(s),
        liquidity_depth: liquidity_depth(s),
        holder_concentration: holder_concentration(s),
        trend_direction: trend_direction(s),
        volume_profile: volume_profile(s),
    }
}
