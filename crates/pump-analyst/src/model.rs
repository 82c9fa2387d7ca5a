//! Domain Models
//!
//! Market snapshots and the structured analysis produced from them.
//! Every categorical field is a closed enum, and every bounded number is a
//! `u8` percentage, so an [`AnalysisResult`] can only hold in-domain values.

use serde::{Deserialize, Serialize};

/// A point-in-time market record for one token (`DataPoint` on the wire)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Token mint address
    pub mint: String,

    pub name: String,

    pub symbol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,

    pub price_usd: f64,

    pub market_cap: f64,

    pub volume_24h: f64,

    pub liquidity: f64,

    pub holder_count: f64,

    /// Share of supply held by the ten largest holders, in percent
    pub top10_holder_pct: f64,

    pub buys_24h: f64,

    pub sells_24h: f64,

    /// Bonding-curve progress, in percent
    pub bonding_progress: f64,

    /// 24h price change, in percent (may be negative)
    pub price_change_24h: f64,

    pub bonding_complete: bool,

    pub is_currently_live: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Snapshot {
    pub fn new(mint: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            mint: mint.into(),
            name: name.into(),
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Total trades over the last 24h
    pub fn trades_24h(&self) -> f64 {
        self.buys_24h + self.sells_24h
    }
}

/// A closed set of wire labels
pub trait Label: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Exact, case-sensitive lookup
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Label for Sentiment {
    const ALL: &'static [Self] = &[Self::Bullish, Self::Bearish, Self::Neutral];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl Label for RiskLevel {
    const ALL: &'static [Self] = &[Self::Critical, Self::High, Self::Medium, Self::Low];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityDepth {
    Deep,
    Moderate,
    Shallow,
    Dry,
}

impl Label for LiquidityDepth {
    const ALL: &'static [Self] = &[Self::Deep, Self::Moderate, Self::Shallow, Self::Dry];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Deep => "deep",
            Self::Moderate => "moderate",
            Self::Shallow => "shallow",
            Self::Dry => "dry",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderConcentration {
    Distributed,
    Moderate,
    Concentrated,
    WhaleDominated,
}

impl Label for HolderConcentration {
    const ALL: &'static [Self] = &[
        Self::Distributed,
        Self::Moderate,
        Self::Concentrated,
        Self::WhaleDominated,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Distributed => "distributed",
            Self::Moderate => "moderate",
            Self::Concentrated => "concentrated",
            Self::WhaleDominated => "whale_dominated",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Sideways,
    /// Only ever reported by a provider
    Reversal,
}

impl Label for TrendDirection {
    const ALL: &'static [Self] = &[Self::Up, Self::Down, Self::Sideways, Self::Reversal];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Sideways => "sideways",
            Self::Reversal => "reversal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeProfile {
    Surging,
    Rising,
    Stable,
    Declining,
    Dead,
}

impl Label for VolumeProfile {
    const ALL: &'static [Self] = &[
        Self::Surging,
        Self::Rising,
        Self::Stable,
        Self::Declining,
        Self::Dead,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Surging => "surging",
            Self::Rising => "rising",
            Self::Stable => "stable",
            Self::Declining => "declining",
            Self::Dead => "dead",
        }
    }
}

/// Risk-factor vocabulary.
///
/// The heuristic engine emits the first nine tags; the remaining four can
/// only come from a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    WhaleDominance,
    HighConcentration,
    LowLiquidity,
    DecliningHolders,
    BondingCurveRisk,
    DeadVolume,
    SmartMoneyInflow,
    HealthyDistribution,
    OrganicVolume,
    RugPullRisk,
    PumpAndDump,
    WashTrading,
    DevSelling,
}

impl Label for RiskFactor {
    const ALL: &'static [Self] = &[
        Self::WhaleDominance,
        Self::HighConcentration,
        Self::LowLiquidity,
        Self::DecliningHolders,
        Self::BondingCurveRisk,
        Self::DeadVolume,
        Self::SmartMoneyInflow,
        Self::HealthyDistribution,
        Self::OrganicVolume,
        Self::RugPullRisk,
        Self::PumpAndDump,
        Self::WashTrading,
        Self::DevSelling,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::WhaleDominance => "whale_dominance",
            Self::HighConcentration => "high_concentration",
            Self::LowLiquidity => "low_liquidity",
            Self::DecliningHolders => "declining_holders",
            Self::BondingCurveRisk => "bonding_curve_risk",
            Self::DeadVolume => "dead_volume",
            Self::SmartMoneyInflow => "smart_money_inflow",
            Self::HealthyDistribution => "healthy_distribution",
            Self::OrganicVolume => "organic_volume",
            Self::RugPullRisk => "rug_pull_risk",
            Self::PumpAndDump => "pump_and_dump",
            Self::WashTrading => "wash_trading",
            Self::DevSelling => "dev_selling",
        }
    }
}

/// Upper bound on reported risk factors
pub const MAX_RISK_FACTORS: usize = 8;

/// Structured analysis of one snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sentiment: Sentiment,

    /// 0 = extremely bearish, 50 = neutral, 100 = extremely bullish
    pub score: u8,

    pub summary: String,

    pub risk_level: RiskLevel,

    /// 1 to [`MAX_RISK_FACTORS`] tags
    pub risk_factors: Vec<RiskFactor>,

    /// Share of buys among all trades, 0-100
    pub buy_pressure: u8,

    /// 0 = stable, 100 = extreme volatility
    pub volatility_score: u8,

    pub liquidity_depth: LiquidityDepth,

    pub holder_concentration: HolderConcentration,

    pub trend_direction: TrendDirection,

    pub volume_profile: VolumeProfile,
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(
    Sentiment,
    RiskLevel,
    LiquidityDepth,
    HolderConcentration,
    TrendDirection,
    VolumeProfile,
    RiskFactor
);
