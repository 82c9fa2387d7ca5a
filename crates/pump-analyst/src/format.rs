//! Number rounding and rendering helpers.
//!
//! Rounding follows the platform's scoring conventions: integer rounding is
//! half-up (toward +inf on an exact .5), and fixed-decimal rendering rounds
//! the exact binary value half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to the nearest integer, ties toward +inf
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Round half up and clamp into a 0-100 percentage. NaN maps to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(x: f64) -> u8 {
    let rounded = round_half_up(x);
    if rounded.is_nan() {
        return 0;
    }
    rounded.clamp(0.0, 100.0) as u8
}

/// Render `x` with exactly `dp` fraction digits
pub fn fixed(x: f64, dp: u32) -> String {
    match Decimal::from_f64_retain(x) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", dp as usize, rounded)
        }
        None => format!("{:.*}", dp as usize, x),
    }
}

/// Compact dollar amount: `1.2M`, `3.4K`, or two decimals below a thousand
pub fn compact_usd(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{}M", fixed(n / 1_000_000.0, 1))
    } else if n >= 1_000.0 {
        format!("{}K", fixed(n / 1_000.0, 1))
    } else {
        fixed(n, 2)
    }
}

/// Thousands-grouped rendering with up to three fraction digits (`12,345.678`)
pub fn grouped(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let rendered = fixed(n, 3);
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let sign = if out.chars().all(|c| c == '0' || c == ',') && frac_part.is_empty() {
        ""
    } else {
        sign
    };

    if frac_part.is_empty() {
        format!("{sign}{out}")
    } else {
        format!("{sign}{out}.{frac_part}")
    }
}
