//! Plain-language summary built from the heuristic fields.

use crate::format::{compact_usd, fixed, grouped};
use crate::model::{Snapshot, TrendDirection};

use super::rules;

/// Render the summary paragraph for a snapshot.
///
/// Sentences, in order: headline, price move, volume against liquidity,
/// holders, trend (omitted when sideways), bonding curve (omitted once
/// complete).
pub fn build_summary(s: &Snapshot) -> String {
    let trend = rules::trend_direction(s);

    let mut parts = vec![
        format!(
            "{} is {} with a {} risk profile.",
            s.symbol,
            rules::sentiment(s),
            rules::risk_level(s)
        ),
        format!(
            "Price {} {}% over 24h.",
            if s.price_change_24h >= 0.0 { "up" } else { "down" },
            fixed(s.price_change_24h.abs(), 1)
        ),
        format!(
            "Volume is {} (${}) against {} liquidity (${}).",
            rules::volume_profile(s),
            compact_usd(s.volume_24h),
            rules::liquidity_depth(s),
            compact_usd(s.liquidity)
        ),
        format!(
            "{} holders with {} concentration (top 10 hold {}%).",
            grouped(s.holder_count),
            rules::holder_concentration(s),
            fixed(s.top10_holder_pct, 1)
        ),
    ];

    if trend != TrendDirection::Sideways {
        parts.push(format!("Trend direction: {}.", trend));
    }

    if !s.bonding_complete {
        parts.push(format!("Bonding curve at {}%.", fixed(s.bonding_progress, 1)));
    }

    parts.join(" ")
}
