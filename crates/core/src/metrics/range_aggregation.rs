//! Multi-day path: one summed row per key across an inclusive date window.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::metrics_calculator::derive_metrics;
use super::{LagIndicators, MetricKey, MetricRecord, PerformanceRow};

#[derive(Debug)]
struct Accumulator {
    key: MetricKey,
    account_id: Option<String>,
    /// `None` once the running total has overflowed.
    spend: Option<Decimal>,
    revenue: Option<Decimal>,
}

/// Sums spend and revenue per `(entity_name, channel_id, style_id)` for every
/// record dated within `[start, end]`.
///
/// Output follows first-seen source order. Lag indicators are
/// [`LagIndicators::NotApplicable`]. An inverted or empty window yields no rows.
pub fn aggregate_range(
    records: &[MetricRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<PerformanceRow> {
    if start > end {
        debug!("Inverted range {}..={} selects no rows", start, end);
        return Vec::new();
    }

    let mut order: Vec<Accumulator> = Vec::new();
    let mut index: HashMap<MetricKey, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.date >= start && r.date <= end) {
        let key = record.key();
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), order.len());
                order.push(Accumulator {
                    key,
                    account_id: None,
                    spend: Some(Decimal::ZERO),
                    revenue: Some(Decimal::ZERO),
                });
                order.len() - 1
            }
        };
        let acc = &mut order[slot];
        acc.spend = acc.spend.and_then(|total| total.checked_add(record.spend));
        acc.revenue = acc.revenue.and_then(|total| total.checked_add(record.revenue));
        if acc.account_id.is_none() {
            acc.account_id = record.account_id.clone();
        }
    }

    order
        .into_iter()
        .map(|acc| {
            if acc.spend.is_none() || acc.revenue.is_none() {
                warn!("Range totals for {} overflow; reporting them as 0", acc.key);
            }
            let spend = acc.spend.unwrap_or(Decimal::ZERO);
            let revenue = acc.revenue.unwrap_or(Decimal::ZERO);
            PerformanceRow {
                metrics: derive_metrics(spend, revenue),
                entity_name: acc.key.entity_name,
                channel_id: acc.key.channel_id,
                style_id: acc.key.style_id,
                account_id: acc.account_id,
                spend,
                revenue,
                lag: LagIndicators::NotApplicable,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::join_lagged;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(d: &str, name: &str, spend: Decimal, revenue: Decimal) -> MetricRecord {
        MetricRecord {
            date: date(d),
            entity_name: name.to_string(),
            channel_id: "ch1".to_string(),
            style_id: "st1".to_string(),
            spend,
            revenue,
            account_id: None,
        }
    }

    #[test]
    fn test_sums_across_window() {
        let records = vec![
            record("2024-01-01", "A", dec!(10), dec!(20)),
            record("2024-01-02", "A", dec!(30), dec!(20)),
            record("2024-01-03", "A", dec!(1000), dec!(1000)),
            record("2024-01-02", "B", dec!(5), dec!(0)),
        ];

        let rows = aggregate_range(&records, date("2024-01-01"), date("2024-01-02"));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entity_name, "A");
        assert_eq!(rows[0].spend, dec!(40));
        assert_eq!(rows[0].revenue, dec!(40));
        assert_eq!(rows[0].metrics.roas, dec!(1));
        assert_eq!(rows[0].metrics.profit, Decimal::ZERO);
        assert_eq!(rows[1].entity_name, "B");
        assert_eq!(rows[1].metrics.roas, Decimal::ZERO);
        assert_eq!(rows[1].metrics.profit, dec!(-5));
    }

    #[test]
    fn test_lag_is_not_applicable() {
        let records = vec![
            record("2024-01-01", "A", dec!(10), dec!(20)),
            record("2024-01-02", "A", dec!(10), dec!(20)),
        ];

        let rows = aggregate_range(&records, date("2024-01-02"), date("2024-01-02"));

        assert_eq!(rows[0].lag, LagIndicators::NotApplicable);
        assert_eq!(rows[0].lag.dbf(), None);
        assert!(!rows[0].lag.is_applicable());
    }

    #[test]
    fn test_empty_and_inverted_windows() {
        let records = vec![record("2024-01-01", "A", dec!(10), dec!(20))];
        assert!(aggregate_range(&records, date("2024-02-01"), date("2024-02-03")).is_empty());
        assert!(aggregate_range(&records, date("2024-01-02"), date("2024-01-01")).is_empty());
    }

    #[test]
    fn test_single_day_range_matches_day_totals() {
        let records = vec![
            record("2024-01-01", "A", dec!(100), dec!(80)),
            record("2024-01-02", "A", dec!(100), dec!(150)),
            record("2024-01-02", "B", dec!(7.25), dec!(3.10)),
        ];
        let d = date("2024-01-02");

        let day_rows = join_lagged(&records, d);
        let range_rows = aggregate_range(&records, d, d);

        assert_eq!(day_rows.len(), range_rows.len());
        for (day, range) in day_rows.iter().zip(range_rows.iter()) {
            assert_eq!(day.key(), range.key());
            assert_eq!(day.spend, range.spend);
            assert_eq!(day.revenue, range.revenue);
            assert_eq!(day.metrics, range.metrics);
        }
    }

    #[test]
    fn test_account_id_taken_from_first_record_that_has_one() {
        let mut second = record("2024-01-02", "A", dec!(1), dec!(1));
        second.account_id = Some("act_9".to_string());
        let records = vec![record("2024-01-01", "A", dec!(1), dec!(1)), second];

        let rows = aggregate_range(&records, date("2024-01-01"), date("2024-01-02"));

        assert_eq!(rows[0].account_id.as_deref(), Some("act_9"));
    }

    #[test]
    fn test_overflowing_totals_collapse_to_zero() {
        let records = vec![
            record("2024-01-01", "A", Decimal::MAX, dec!(10)),
            record("2024-01-02", "A", Decimal::MAX, dec!(10)),
            record("2024-01-02", "B", dec!(4), dec!(6)),
        ];

        let rows = aggregate_range(&records, date("2024-01-01"), date("2024-01-02"));

        assert_eq!(rows[0].spend, Decimal::ZERO);
        assert_eq!(rows[0].revenue, dec!(20));
        assert_eq!(rows[0].metrics.roas, Decimal::ZERO);
        assert_eq!(rows[0].metrics.profit, dec!(20));
        assert_eq!(rows[1].spend, dec!(4));
        assert_eq!(rows[1].metrics.roas, dec!(1.5));
    }
}
