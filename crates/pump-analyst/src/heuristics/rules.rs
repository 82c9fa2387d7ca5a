//! Per-field heuristic rules.
//!
//! Each rule reads a [`Snapshot`] and derives one field of the analysis.
//! Comparisons against NaN are false, so malformed inputs fall through to the
//! last branch of each rule instead of panicking.

use crate::format::percent;
use crate::model::{
    HolderConcentration, LiquidityDepth, MAX_RISK_FACTORS, RiskFactor, RiskLevel, Sentiment,
    Snapshot, TrendDirection, VolumeProfile,
};

pub fn sentiment(s: &Snapshot) -> Sentiment {
    if s.price_change_24h > 5.0 {
        Sentiment::Bullish
    } else if s.price_change_24h < -5.0 {
        Sentiment::Bearish
    } else {
        Sentiment::Neutral
    }
}

/// Neutral 50, moved two points per percent of 24h change
pub fn score(s: &Snapshot) -> u8 {
    percent(50.0 + s.price_change_24h * 2.0)
}

pub fn risk_level(s: &Snapshot) -> RiskLevel {
    if s.top10_holder_pct > 80.0 || s.liquidity < 1_000.0 {
        RiskLevel::Critical
    } else if s.top10_holder_pct > 60.0 || s.holder_count < 20.0 {
        RiskLevel::High
    } else if s.top10_holder_pct > 40.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Fixed-order predicates; never empty
pub fn risk_factors(s: &Snapshot) -> Vec<RiskFactor> {
    let checks = [
        (s.top10_holder_pct > 80.0, RiskFactor::WhaleDominance),
        (s.top10_holder_pct > 50.0, RiskFactor::HighConcentration),
        (s.liquidity < 5_000.0, RiskFactor::LowLiquidity),
        (s.holder_count < 50.0, RiskFactor::DecliningHolders),
        (!s.bonding_complete, RiskFactor::BondingCurveRisk),
        (s.volume_24h < 100.0, RiskFactor::DeadVolume),
        (s.buys_24h > s.sells_24h * 3.0, RiskFactor::SmartMoneyInflow),
        (
            s.holder_count > 500.0 && s.top10_holder_pct < 30.0,
            RiskFactor::HealthyDistribution,
        ),
        (s.volume_24h > s.liquidity * 2.0, RiskFactor::OrganicVolume),
    ];

    let mut factors: Vec<RiskFactor> = checks
        .into_iter()
        .filter_map(|(hit, factor)| hit.then_some(factor))
        .collect();

    if factors.is_empty() {
        factors.push(RiskFactor::HealthyDistribution);
    }
    factors.truncate(MAX_RISK_FACTORS);
    factors
}

pub fn holder_concentration(s: &Snapshot) -> HolderConcentration {
    if s.top10_holder_pct > 80.0 {
        HolderConcentration::WhaleDominated
    } else if s.top10_holder_pct > 50.0 {
        HolderConcentration::Concentrated
    } else if s.top10_holder_pct > 30.0 {
        HolderConcentration::Moderate
    } else {
        HolderConcentration::Distributed
    }
}

/// Never reports `Reversal`
pub fn trend_direction(s: &Snapshot) -> TrendDirection {
    if s.price_change_24h > 10.0 {
        TrendDirection::Up
    } else if s.price_change_24h < -10.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Sideways
    }
}

pub fn volume_profile(s: &Snapshot) -> VolumeProfile {
    let liquid = s.liquidity > 0.0;
    if liquid && s.volume_24h > s.liquidity * 2.0 {
        VolumeProfile::Surging
    } else if liquid && s.volume_24h > s.liquidity {
        VolumeProfile::Rising
    } else if s.volume_24h > 1_000.0 {
        VolumeProfile::Stable
    } else if s.volume_24h > 100.0 {
        VolumeProfile::Declining
    } else {
        VolumeProfile::Dead
    }
}

pub fn liquidity_depth(s: &Snapshot) -> LiquidityDepth {
    if s.liquidity > 100_000.0 {
        LiquidityDepth::Deep
    } else if s.liquidity > 10_000.0 {
        LiquidityDepth::Moderate
    } else if s.liquidity > 1_000.0 {
        LiquidityDepth::Shallow
    } else {
        LiquidityDepth::Dry
    }
}

/// Buys as a share of all trades; 50 when nothing traded
pub fn buy_pressure(s: &Snapshot) -> u8 {
    let total = s.trades_24h();
    if total == 0.0 {
        return 50;
    }
    percent(s.buys_24h / total * 100.0)
}

pub fn volatility_score(s: &Snapshot) -> u8 {
    percent(s.price_change_24h.abs() * 2.0)
}
