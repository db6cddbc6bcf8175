//! Per-day path: target-date rows with trailing ROAS from the two prior days.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use super::metrics_calculator::derive_metrics;
use super::{LagIndicators, MetricKey, MetricRecord, PerformanceRow};
use crate::utils::time_utils::days_before;

/// Lookup of prior-day ROAS by composite key.
type LagTable = HashMap<MetricKey, Decimal>;

/// Selects the rows dated `target_date` and attaches `DBF` (one day back) and
/// `2DBF` (two days back) from rows sharing the same key.
///
/// Keys are expected to be normalized already (see [`super::ingest_performance`]).
/// An empty result means the date has no data; callers report that instead
/// of continuing. Missing prior days simply leave the indicators absent.
pub fn join_lagged(records: &[MetricRecord], target_date: NaiveDate) -> Vec<PerformanceRow> {
    let dbf_table = days_before(target_date, 1)
        .map(|date| build_lag_table(records, date))
        .unwrap_or_default();
    let two_dbf_table = days_before(target_date, 2)
        .map(|date| build_lag_table(records, date))
        .unwrap_or_default();

    debug!(
        "Lag tables for {}: {} keys at d-1, {} keys at d-2",
        target_date,
        dbf_table.len(),
        two_dbf_table.len()
    );

    let mut emitted: HashSet<MetricKey> = HashSet::new();
    records
        .iter()
        .filter(|record| record.date == target_date)
        .filter(|record| emitted.insert(record.key()))
        .map(|record| {
            let key = record.key();
            PerformanceRow {
                entity_name: record.entity_name.clone(),
                channel_id: record.channel_id.clone(),
                style_id: record.style_id.clone(),
                account_id: record.account_id.clone(),
                spend: record.spend,
                revenue: record.revenue,
                metrics: derive_metrics(record.spend, record.revenue),
                lag: LagIndicators::Trailing {
                    dbf: dbf_table.get(&key).copied(),
                    two_dbf: two_dbf_table.get(&key).copied(),
                },
            }
        })
        .collect()
}

/// Builds the ROAS lookup for one prior date. First record per key wins.
fn build_lag_table(records: &[MetricRecord], date: NaiveDate) -> LagTable {
    let mut table = LagTable::new();
    for record in records.iter().filter(|r| r.date == date) {
        table
            .entry(record.key())
            .or_insert_with(|| derive_metrics(record.spend, record.revenue).roas);
    }
    table
}
