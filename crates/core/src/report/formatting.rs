//! Display formatting. Absent values render as a placeholder rather than zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{ABSENT_DISPLAY, DISPLAY_DECIMAL_PRECISION};
use crate::metrics::LagIndicators;

/// `$1,234.56`; negatives as `-$1,234.56`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), fraction)
}

/// Ratio as a whole percentage: `1.5` renders as `150%`. A ratio too large to
/// scale renders as the placeholder.
pub fn format_ratio_percent(ratio: Option<Decimal>) -> String {
    match ratio.and_then(|value| value.checked_mul(Decimal::ONE_HUNDRED)) {
        Some(pct) => {
            let pct = pct.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
            format!("{}%", pct.normalize())
        }
        None => ABSENT_DISPLAY.to_string(),
    }
}

/// Percentage value with one decimal, e.g. a profit margin of `12.34` as `12.3%`.
pub fn format_margin(pct: Option<Decimal>) -> String {
    match pct {
        Some(value) => format!(
            "{:.1}%",
            value.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
        ),
        None => ABSENT_DISPLAY.to_string(),
    }
}

/// Renders `(DBF, 2DBF)`; range rows show the placeholder for both.
pub fn format_lag(lag: &LagIndicators) -> (String, String) {
    (format_ratio_percent(lag.dbf()), format_ratio_percent(lag.two_dbf()))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.999)), "$1,000.00");
        assert_eq!(format_currency(dec!(-20)), "-$20.00");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_format_ratio_percent() {
        assert_eq!(format_ratio_percent(Some(dec!(1.5))), "150%");
        assert_eq!(format_ratio_percent(Some(dec!(0.8))), "80%");
        assert_eq!(format_ratio_percent(Some(dec!(0.8349))), "83%");
        assert_eq!(format_ratio_percent(Some(Decimal::ZERO)), "0%");
        assert_eq!(format_ratio_percent(None), ABSENT_DISPLAY);
        assert_eq!(format_ratio_percent(Some(Decimal::MAX)), ABSENT_DISPLAY);
    }

    #[test]
    fn test_format_margin() {
        assert_eq!(format_margin(Some(dec!(12.34))), "12.3%");
        assert_eq!(format_margin(Some(dec!(-50))), "-50.0%");
        assert_eq!(format_margin(None), ABSENT_DISPLAY);
    }

    #[test]
    fn test_format_lag_not_applicable() {
        let (dbf, two_dbf) = format_lag(&LagIndicators::NotApplicable);
        assert_eq!(dbf, ABSENT_DISPLAY);
        assert_eq!(two_dbf, ABSENT_DISPLAY);

        let (dbf, two_dbf) = format_lag(&LagIndicators::Trailing {
            dbf: Some(dec!(0.8)),
            two_dbf: None,
        });
        assert_eq!(dbf, "80%");
        assert_eq!(two_dbf, ABSENT_DISPLAY);
    }
}
