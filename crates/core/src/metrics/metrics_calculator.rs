//! Derived metric calculations with explicit zero and overflow handling.
//!
//! Nothing in this module fails: malformed input coerces to zero so the
//! pipeline always completes.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::DerivedMetrics;

/// Coerces a cell to a decimal. Blank, non-numeric, or malformed text is `0`.
pub fn coerce_decimal(raw: &str) -> Decimal {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

/// Parses plain or scientific decimal text, `None` when it is not a number.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Computes profit and ROAS for a spend/revenue pair.
///
/// ROAS is `revenue / spend` for positive spend and `0` otherwise. A profit or
/// quotient that cannot be represented collapses to `0` as well.
pub fn derive_metrics(spend: Decimal, revenue: Decimal) -> DerivedMetrics {
    DerivedMetrics {
        profit: revenue.checked_sub(spend).unwrap_or(Decimal::ZERO),
        roas: calculate_roas(spend, revenue),
    }
}

/// Sums amounts, `None` once the total leaves the representable range.
pub fn checked_total<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

pub fn calculate_roas(spend: Decimal, revenue: Decimal) -> Decimal {
    if spend > Decimal::ZERO {
        revenue.checked_div(spend).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// Parses a percentage string into a ratio, `None` when it is not numeric.
///
/// A trailing `%` is optional; the value is always divided by 100, so `"85%"`
/// and `"85"` both yield `0.85`. Blank input is `0`.
pub fn parse_percentage(raw: &str) -> Option<Decimal> {
    let stripped = raw.trim();
    let stripped = stripped.strip_suffix('%').unwrap_or(stripped).trim();
    if stripped.is_empty() {
        return Some(Decimal::ZERO);
    }
    parse_decimal(stripped).and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
}

/// Percentage normalization for calculator call sites: unparseable is `0`.
pub fn normalize_percentage(raw: &str) -> Decimal {
    parse_percentage(raw).unwrap_or(Decimal::ZERO)
}

/// Parses a ratio given either as a decimal (`"0.85"`) or as a
/// percentage-formatted string (`"85%"`). `None` when it is not numeric.
pub fn parse_ratio(raw: &str) -> Option<Decimal> {
    if raw.contains('%') {
        parse_percentage(raw)
    } else {
        parse_decimal(raw)
    }
}
