//! Converts raw performance rows into normalized, de-duplicated records.

use log::{debug, warn};
use std::collections::HashSet;

use super::metrics_calculator::coerce_decimal;
use super::{MetricKey, MetricRecord, RawPerformanceRow};
use crate::utils::text_utils::{non_blank, normalize_key};
use crate::utils::time_utils::parse_report_date;

/// Normalizes every raw row into a [`MetricRecord`].
///
/// - Key parts are trimmed (case preserved); this is the only place keys are
///   normalized.
/// - Spend and revenue coerce to `0` when malformed.
/// - Rows whose date cannot be parsed are dropped, since they cannot be placed
///   in any scope.
/// - When several rows share `(entity_name, channel_id, style_id, date)`, the
///   first in source order wins and the rest are dropped.
pub fn ingest_performance(rows: &[RawPerformanceRow]) -> Vec<MetricRecord> {
    let mut seen: HashSet<(MetricKey, chrono::NaiveDate)> = HashSet::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());
    let mut undated = 0usize;
    let mut duplicates = 0usize;

    for (index, raw) in rows.iter().enumerate() {
        let Some(date) = parse_report_date(&raw.date) else {
            debug!(
                "Skipping performance row {} with unparseable date '{}'",
                index, raw.date
            );
            undated += 1;
            continue;
        };

        let record = MetricRecord {
            date,
            entity_name: normalize_key(&raw.ad_name),
            channel_id: normalize_key(&raw.channel_id),
            style_id: normalize_key(&raw.style_id),
            spend: coerce_decimal(&raw.spend),
            revenue: coerce_decimal(&raw.revenue),
            account_id: raw.account_id.as_deref().and_then(non_blank).map(str::to_string),
        };

        if !seen.insert((record.key(), date)) {
            debug!(
                "Duplicate performance row for {} on {}; keeping the first occurrence",
                record.key(),
                date
            );
            duplicates += 1;
            continue;
        }
        records.push(record);
    }

    if undated > 0 {
        warn!("Dropped {} performance rows with unparseable dates", undated);
    }
    if duplicates > 0 {
        warn!(
            "Dropped {} duplicate performance rows (first occurrence kept)",
            duplicates
        );
    }
    records
}
