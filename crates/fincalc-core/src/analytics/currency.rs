use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Currency, Money};

/// Render `value` as `"USD 1,234.57"`: half-up rounding to cents,
/// comma thousands separators, leading minus for negatives.
pub fn format_currency(value: Money, currency: &Currency) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = rounded.abs().to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{} {}{}.{}", currency.code(), sign, group_thousands(whole), cents)
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
