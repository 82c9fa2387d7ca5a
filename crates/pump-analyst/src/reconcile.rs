//! Response Reconciler
//!
//! Normalises free-form provider output into an [`AnalysisResult`]. Provider
//! text is parsed as an untyped JSON object and every field is validated on
//! its own; anything missing or out of domain is replaced by the heuristic
//! value for that field.

use serde_json::{Map, Value};

use crate::format::percent;
use crate::heuristics::compute_defaults;
use crate::model::{AnalysisResult, Label, MAX_RISK_FACTORS, RiskFactor, Snapshot};

/// Reconcile raw provider text against the heuristics for `snapshot`
pub fn reconcile(raw: &str, snapshot: &Snapshot) -> AnalysisResult {
    let defaults = compute_defaults(snapshot);

    let parsed: Value = match serde_json::from_str(strip_fences(raw)) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(mint = %snapshot.mint, error = %e, "Provider response is not JSON, using heuristics");
            return defaults;
        }
    };

    let Value::Object(obj) = parsed else {
        tracing::warn!(mint = %snapshot.mint, "Provider response is not a JSON object, using heuristics");
        return defaults;
    };

    AnalysisResult {
        sentiment: label(&obj, "sentiment", defaults.sentiment),
        score: number(&obj, "score", defaults.score),
        summary: summary(&obj, defaults.summary),
        risk_level: label(&obj, "riskLevel", defaults.risk_level),
        risk_factors: risk_factors(&obj, defaults.risk_factors),
        buy_pressure: number(&obj, "buyPressure", defaults.buy_pressure),
        volatility_score: number(&obj, "volatilityScore", defaults.volatility_score),
        liquidity_depth: label(&obj, "liquidityDepth", defaults.liquidity_depth),
        holder_concentration: label(&obj, "holderConcentration", defaults.holder_concentration),
        trend_direction: label(&obj, "trendDirection", defaults.trend_direction),
        volume_profile: label(&obj, "volumeProfile", defaults.volume_profile),
    }
}

/// Strip a surrounding markdown code fence and its language tag
fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };

    let body = body.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let body = body.trim_start();
    match body.strip_suffix("```") {
        Some(inner) => inner.trim_end(),
        None => body,
    }
}

fn substituted(key: &str) {
    tracing::debug!(field = key, "Field missing or invalid, using heuristic value");
}

fn label<T: Label>(obj: &Map<String, Value>, key: &str, fallback: T) -> T {
    match obj.get(key).and_then(Value::as_str).and_then(T::parse) {
        Some(value) => value,
        None => {
            substituted(key);
            fallback
        }
    }
}

fn number(obj: &Map<String, Value>, key: &str, fallback: u8) -> u8 {
    match obj.get(key).and_then(Value::as_f64) {
        Some(n) => percent(n),
        None => {
            substituted(key);
            fallback
        }
    }
}

fn summary(obj: &Map<String, Value>, fallback: String) -> String {
    match obj.get("summary").and_then(Value::as_str) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            substituted("summary");
            fallback
        }
    }
}

/// Accept a non-empty all-string array, keeping only known tags
fn risk_factors(obj: &Map<String, Value>, fallback: Vec<RiskFactor>) -> Vec<RiskFactor> {
    let Some(items) = obj.get("riskFactors").and_then(Value::as_array) else {
        substituted("riskFactors");
        return fallback;
    };

    let tags: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
    let Some(tags) = tags.filter(|t| !t.is_empty()) else {
        substituted("riskFactors");
        return fallback;
    };

    let mut known: Vec<RiskFactor> = tags.into_iter().filter_map(RiskFactor::parse).collect();
    if known.is_empty() {
        substituted("riskFactors");
        return fallback;
    }
    known.truncate(MAX_RISK_FACTORS);
    known
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        HolderConcentration, LiquidityDepth, RiskLevel, Sentiment, TrendDirection, VolumeProfile,
    };
    use crate::heuristics::tests::{any_snapshot, in_domain};
    use proptest::prelude::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            price_change_24h: -8.5,
            top10_holder_pct: 55.0,
            liquidity: 8_000.0,
            holder_count: 210.0,
            volume_24h: 3_500.0,
            buys_24h: 30.0,
            sells_24h: 45.0,
            bonding_progress: 91.0,
            ..Snapshot::new("7xKXtg", "Moo Deng", "MOODENG")
        }
    }

    const FULL: &str = r#"{
        "sentiment": "bullish",
        "score": 81,
        "summary": "Strong inflows with moderate concentration.",
        "riskLevel": "medium",
        "riskFactors": ["high_concentration", "smart_money_inflow"],
        "buyPressure": 72,
        "volatilityScore": 33,
        "liquidityDepth": "moderate",
        "holderConcentration": "concentrated",
        "trendDirection": "reversal",
        "volumeProfile": "rising"
    }"#;

    #[test]
    fn test_not_json_returns_heuristics() {
        let s = snapshot();
        assert_eq!(reconcile("not json", &s), compute_defaults(&s));
    }

    #[test]
    fn test_non_object_returns_heuristics() {
        let s = snapshot();
        for raw in ["[1, 2, 3]", "42", "\"bullish\"", "null", "true"] {
            assert_eq!(reconcile(raw, &s), compute_defaults(&s), "{}", raw);
        }
    }

    #[test]
    fn test_partial_object_fills_from_heuristics() {
        let s = snapshot();
        let defaults = compute_defaults(&s);

        let result = reconcile(r#"{"score": 150, "sentiment": "bullish"}"#, &s);

        assert_eq!(result.score, 100);
        assert_eq!(result.sentiment, Sentiment::Bullish);
        assert_eq!(
            AnalysisResult {
                score: defaults.score,
                sentiment: defaults.sentiment,
                ..result
            },
            defaults
        );
    }

    #[test]
    fn test_full_valid_object_is_taken_verbatim() {
        let result = reconcile(FULL, &snapshot());

        assert_eq!(result.sentiment, Sentiment::Bullish);
        assert_eq!(result.score, 81);
        assert_eq!(result.summary, "Strong inflows with moderate concentration.");
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(
            result.risk_factors,
            vec![RiskFactor::HighConcentration, RiskFactor::SmartMoneyInflow]
        );
        assert_eq!(result.buy_pressure, 72);
        assert_eq!(result.volatility_score, 33);
        assert_eq!(result.liquidity_depth, LiquidityDepth::Moderate);
        assert_eq!(result.holder_concentration, HolderConcentration::Concentrated);
        assert_eq!(result.trend_direction, TrendDirection::Reversal);
        assert_eq!(result.volume_profile, VolumeProfile::Rising);
    }

    #[test]
    fn test_fenced_variants() {
        let s = snapshot();
        let expected = reconcile(FULL, &s);

        for raw in [
            format!("```json\n{}\n```", FULL),
            format!("```\n{}\n```", FULL),
            format!("  ```JSON {}```  ", FULL),
            format!("```json5\n{}", FULL),
        ] {
            assert_eq!(reconcile(&raw, &s), expected, "{}", raw);
        }
    }

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_fences("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(strip_fences("```"), "");
    }

    #[test]
    fn test_enum_mismatch_uses_heuristic() {
        let s = snapshot();
        let defaults = compute_defaults(&s);

        let result = reconcile(
            r#"{"sentiment": "Bullish", "riskLevel": "extreme", "trendDirection": 1}"#,
            &s,
        );
        assert_eq!(result.sentiment, defaults.sentiment);
        assert_eq!(result.risk_level, defaults.risk_level);
        assert_eq!(result.trend_direction, defaults.trend_direction);
    }

    #[test]
    fn test_numbers_must_be_numeric() {
        let s = snapshot();
        let defaults = compute_defaults(&s);

        let result = reconcile(
            r#"{"score": "90", "buyPressure": -12, "volatilityScore": 44.5}"#,
            &s,
        );
        assert_eq!(result.score, defaults.score);
        assert_eq!(result.buy_pressure, 0);
        assert_eq!(result.volatility_score, 45);
    }

    #[test]
    fn test_empty_summary_uses_heuristic() {
        let s = snapshot();
        let result = reconcile(r#"{"summary": ""}"#, &s);
        assert_eq!(result.summary, compute_defaults(&s).summary);
    }

    #[test]
    fn test_risk_factor_validation() {
        let s = snapshot();
        let defaults = compute_defaults(&s);

        // Empty array
        let result = reconcile(r#"{"riskFactors": []}"#, &s);
        assert_eq!(result.risk_factors, defaults.risk_factors);

        // One non-string element poisons the array
        let result = reconcile(r#"{"riskFactors": ["rug_pull_risk", 7]}"#, &s);
        assert_eq!(result.risk_factors, defaults.risk_factors);

        // Unknown tags dropped, known kept in order
        let result = reconcile(r#"{"riskFactors": ["wash_trading", "to_the_moon", "dev_selling"]}"#, &s);
        assert_eq!(
            result.risk_factors,
            vec![RiskFactor::WashTrading, RiskFactor::DevSelling]
        );

        // Only unknown tags
        let result = reconcile(r#"{"riskFactors": ["to_the_moon"]}"#, &s);
        assert_eq!(result.risk_factors, defaults.risk_factors);
    }

    #[test]
    fn test_risk_factors_truncated() {
        let raw = r#"{"riskFactors": [
            "whale_dominance", "high_concentration", "low_liquidity", "declining_holders",
            "bonding_curve_risk", "dead_volume", "rug_pull_risk", "pump_and_dump",
            "wash_trading", "dev_selling"
        ]}"#;
        let result = reconcile(raw, &snapshot());
        assert_eq!(result.risk_factors.len(), MAX_RISK_FACTORS);
        assert_eq!(result.risk_factors[7], RiskFactor::PumpAndDump);
    }

    #[test]
    fn test_unknown_tags_dropped_before_cap() {
        let raw = r#"{"riskFactors": [
            "to_the_moon", "whale_dominance", "high_concentration", "low_liquidity",
            "declining_holders", "bonding_curve_risk", "dead_volume", "rug_pull_risk",
            "pump_and_dump"
        ]}"#;
        let result = reconcile(raw, &snapshot());
        assert_eq!(result.risk_factors.len(), MAX_RISK_FACTORS);
        assert_eq!(result.risk_factors[0], RiskFactor::WhaleDominance);
        assert_eq!(result.risk_factors[7], RiskFactor::PumpAndDump);
    }

    const KEYS: &[&str] = &[
        "sentiment",
        "score",
        "summary",
        "riskLevel",
        "riskFactors",
        "buyPressure",
        "volatilityScore",
        "liquidityDepth",
        "holderConcentration",
        "trendDirection",
        "volumeProfile",
        "unrelated",
    ];

    const WORDS: &[&str] = &[
        "bullish",
        "bearish",
        "neutral",
        "low",
        "critical",
        "deep",
        "dry",
        "whale_dominated",
        "reversal",
        "surging",
        "rug_pull_risk",
        "low_liquidity",
        "healthy_distribution",
        "Bullish",
        "",
        "to_the_moon",
    ];

    /// Any JSON value a provider might put in a field, right type or not
    fn field_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            prop::num::f64::ANY.prop_map(Value::from),
            prop::sample::select(WORDS).prop_map(Value::from),
            ".{0,40}".prop_map(Value::from),
            prop::collection::vec(prop::sample::select(WORDS), 0..12).prop_map(Value::from),
            prop::collection::vec(any::<i64>(), 0..4).prop_map(Value::from),
        ]
    }

    fn provider_object() -> impl Strategy<Value = String> {
        prop::collection::vec((prop::sample::select(KEYS), field_value()), 0..16).prop_map(
            |fields| {
                let obj: Map<String, Value> = fields
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect();
                Value::Object(obj).to_string()
            },
        )
    }

    proptest! {
        #[test]
        fn arbitrary_text_stays_in_domain(raw in ".*", s in any_snapshot()) {
            let result = reconcile(&raw, &s);
            prop_assert!(in_domain(&result), "{:?}", result);
        }

        #[test]
        fn mistyped_objects_stay_in_domain(raw in provider_object(), s in any_snapshot()) {
            let result = reconcile(&raw, &s);
            prop_assert!(in_domain(&result), "{:?}", result);

            let fenced = reconcile(&format!("```json\n{}\n```", raw), &s);
            prop_assert_eq!(fenced, result);
        }

        #[test]
        fn truncated_object_falls_back(len in 0..FULL.len(), s in any_snapshot()) {
            prop_assert_eq!(reconcile(&FULL[..len], &s), compute_defaults(&s));
        }
    }

    #[test]
    fn test_idempotent() {
        let s = snapshot();
        let once = reconcile(FULL, &s);
        let again = reconcile(&serde_json::to_string(&once).unwrap(), &s);
        assert_eq!(once, again);
    }
}
