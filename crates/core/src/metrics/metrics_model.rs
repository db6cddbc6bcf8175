//! Performance domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the performance collection exactly as the store returned it.
///
/// Every cell is kept as text; coercion happens during ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPerformanceRow {
    pub date: String,
    pub ad_name: String,
    pub channel_id: String,
    pub style_id: String,
    pub spend: String,
    pub revenue: String,
    pub account_id: Option<String>,
}

/// Composite join key. Parts are normalized at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricKey {
    pub entity_name: String,
    pub channel_id: String,
    pub style_id: String,
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.entity_name, self.channel_id, self.style_id)
    }
}

/// One entity's performance on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    pub date: NaiveDate,
    pub entity_name: String,
    pub channel_id: String,
    pub style_id: String,
    pub spend: Decimal,
    pub revenue: Decimal,
    pub account_id: Option<String>,
}

impl MetricRecord {
    pub fn key(&self) -> MetricKey {
        MetricKey {
            entity_name: self.entity_name.clone(),
            channel_id: self.channel_id.clone(),
            style_id: self.style_id.clone(),
        }
    }
}

/// Ratios and differences derived from spend and revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub profit: Decimal,
    pub roas: Decimal,
}

/// Trailing ROAS indicators attached to a row.
///
/// Range rows have no single "previous day", so their indicators are not
/// applicable rather than absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum LagIndicators {
    NotApplicable,
    #[serde(rename_all = "camelCase")]
    Trailing {
        /// ROAS one day back.
        dbf: Option<Decimal>,
        /// ROAS two days back.
        two_dbf: Option<Decimal>,
    },
}

impl LagIndicators {
    pub fn dbf(&self) -> Option<Decimal> {
        match self {
            LagIndicators::Trailing { dbf, .. } => *dbf,
            LagIndicators::NotApplicable => None,
        }
    }

    pub fn two_dbf(&self) -> Option<Decimal> {
        match self {
            LagIndicators::Trailing { two_dbf, .. } => *two_dbf,
            LagIndicators::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, LagIndicators::Trailing { .. })
    }
}

/// The selected window of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportScope {
    Day { date: NaiveDate },
    Range { start: NaiveDate, end: NaiveDate },
}

impl ReportScope {
    pub fn day(date: NaiveDate) -> Self {
        ReportScope::Day { date }
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        // A single-day range is still a range: lag indicators stay not applicable
        ReportScope::Range { start, end }
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportScope::Day { date } => write!(f, "{}", date),
            ReportScope::Range { start, end } => write!(f, "{}..={}", start, end),
        }
    }
}

/// A per-day or aggregated row with its derived metrics attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRow {
    pub entity_name: String,
    pub channel_id: String,
    pub style_id: String,
    pub account_id: Option<String>,
    pub spend: Decimal,
    pub revenue: Decimal,
    pub metrics: DerivedMetrics,
    pub lag: LagIndicators,
}

impl PerformanceRow {
    pub fn key(&self) -> MetricKey {
        MetricKey {
            entity_name: self.entity_name.clone(),
            channel_id: self.channel_id.clone(),
            style_id: self.style_id.clone(),
        }
    }
}
