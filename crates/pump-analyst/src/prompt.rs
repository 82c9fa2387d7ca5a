//! Prompts sent to hosted providers.

use crate::format::{fixed, grouped};
use crate::model::Snapshot;

/// Instruction describing the JSON shape, field domains and tag vocabulary
pub const SYSTEM_PROMPT: &str = r#"You are a Solana memecoin analyst for Pump Studio. You receive a DataPoint snapshot of a token and must return a structured JSON analysis.

Respond ONLY with a valid JSON object. No markdown fences, no prose, no explanation. The JSON must have exactly these fields:

{
  "sentiment": "bullish" | "bearish" | "neutral",
  "score": <number 0-100>,
  "summary": "<2-3 sentence analysis>",
  "riskLevel": "critical" | "high" | "medium" | "low",
  "riskFactors": ["<factor>", ...],
  "buyPressure": <number 0-100>,
  "volatilityScore": <number 0-100>,
  "liquidityDepth": "deep" | "moderate" | "shallow" | "dry",
  "holderConcentration": "distributed" | "moderate" | "concentrated" | "whale_dominated",
  "trendDirection": "up" | "down" | "sideways" | "reversal",
  "volumeProfile": "surging" | "rising" | "stable" | "declining" | "dead"
}

Guidelines:
- score: 0 = extremely bearish, 50 = neutral, 100 = extremely bullish
- riskFactors: pick from whale_dominance, high_concentration, low_liquidity, declining_holders, bonding_curve_risk, dead_volume, smart_money_inflow, healthy_distribution, organic_volume, rug_pull_risk, pump_and_dump, wash_trading, dev_selling
- buyPressure: percentage of buys vs total trades (0-100)
- volatilityScore: 0 = stable, 100 = extreme volatility
- summary: concise, data-driven, mention key metrics. No hype or speculation.
- Be skeptical of tokens with very high concentration, very low liquidity, or suspicious volume patterns."#;

/// Render the per-token user prompt
pub fn render_user_prompt(s: &Snapshot) -> String {
    let total = s.trades_24h();
    let buy_ratio = if total > 0.0 {
        fixed(s.buys_24h / total * 100.0, 1)
    } else {
        "N/A".to_string()
    };
    let sign = if s.price_change_24h >= 0.0 { "+" } else { "" };

    let mut prompt = format!(
        "Analyze this Solana token:\n\
         \n\
         Token: {name} (${symbol})\n\
         Mint: {mint}\n\
         Price: ${price}\n\
         24h Change: {sign}{change}%\n\
         Market Cap: ${market_cap}\n\
         24h Volume: ${volume}\n\
         Liquidity: ${liquidity}\n\
         Holders: {holders}\n\
         Top 10 Holder %: {top10}%\n\
         24h Buys: {buys}\n\
         24h Sells: {sells}\n\
         Buy Ratio: {buy_ratio}%\n\
         Bonding Progress: {progress}%\n\
         Bonding Complete: {complete}\n\
         Currently Live: {live}",
        name = s.name,
        symbol = s.symbol,
        mint = s.mint,
        price = s.price_usd,
        change = fixed(s.price_change_24h, 2),
        market_cap = grouped(s.market_cap),
        volume = grouped(s.volume_24h),
        liquidity = grouped(s.liquidity),
        holders = grouped(s.holder_count),
        top10 = fixed(s.top10_holder_pct, 1),
        buys = s.buys_24h,
        sells = s.sells_24h,
        progress = fixed(s.bonding_progress, 1),
        complete = s.bonding_complete,
        live = s.is_currently_live,
    );

    if let Some(description) = s.description.as_deref().filter(|d| !d.is_empty()) {
        prompt.push_str("\nDescription: ");
        prompt.push_str(description);
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            price_usd: 0.000_42,
            market_cap: 420_000.0,
            volume_24h: 88_123.45,
            liquidity: 15_000.0,
            holder_count: 1_234.0,
            top10_holder_pct: 31.25,
            buys_24h: 300.0,
            sells_24h: 100.0,
            bonding_progress: 100.0,
            price_change_24h: 7.0,
            bonding_complete: true,
            is_currently_live: false,
            ..Snapshot::new("9WzDXwBbmkg8", "Peanut", "PNUT")
        }
    }

    #[test]
    fn test_render_user_prompt() {
        let prompt = render_user_prompt(&snapshot());

        assert_eq!(
            prompt,
            "Analyze this Solana token:\n\
             \n\
             Token: Peanut ($PNUT)\n\
             Mint: 9WzDXwBbmkg8\n\
             Price: $0.00042\n\
             24h Change: +7.00%\n\
             Market Cap: $420,000\n\
             24h Volume: $88,123.45\n\
             Liquidity: $15,000\n\
             Holders: 1,234\n\
             Top 10 Holder %: 31.3%\n\
             24h Buys: 300\n\
             24h Sells: 100\n\
             Buy Ratio: 75.0%\n\
             Bonding Progress: 100.0%\n\
             Bonding Complete: true\n\
             Currently Live: false"
        );
    }

    #[test]
    fn test_tiny_price_is_positional() {
        let s = Snapshot {
            price_usd: 1e-7,
            ..snapshot()
        };
        assert!(render_user_prompt(&s).contains("Price: $0.0000001\n"));
    }

    #[test]
    fn test_no_trades_and_description() {
        let s = Snapshot {
            buys_24h: 0.0,
            sells_24h: 0.0,
            price_change_24h: -1.5,
            description: Some("The people's peanut".into()),
            ..snapshot()
        };
        let prompt = render_user_prompt(&s);

        assert!(prompt.contains("Buy Ratio: N/A%\n"));
        assert!(prompt.contains("24h Change: -1.50%\n"));
        assert!(prompt.ends_with("Currently Live: false\nDescription: The people's peanut"));
    }

    #[test]
    fn test_system_prompt_lists_vocabulary() {
        use crate::model::{Label, RiskFactor};
        for factor in RiskFactor::ALL {
            assert!(SYSTEM_PROMPT.contains(factor.as_str()));
        }
    }
}
