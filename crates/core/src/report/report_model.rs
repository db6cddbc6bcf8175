//! Report and filter models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ReportSummary;
use crate::metrics::ReportScope;
use crate::reconciliation::{ChangeBatch, ReconciledRow};

/// Optional, conjunctive restrictions on the displayed rows.
///
/// Filtering happens after change detection, so filtered-out rows never reach
/// a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFilter {
    pub account_id: Option<String>,
    pub style_group: Option<String>,
    pub category: Option<String>,
    pub domain: Option<String>,
    /// Minimum ROAS as a ratio (`1.2` means 120%).
    pub min_roas: Option<Decimal>,
}

impl RowFilter {
    pub fn is_empty(&self) -> bool {
        self.account_id.is_none()
            && self.style_group.is_none()
            && self.category.is_none()
            && self.domain.is_none()
            && self.min_roas.is_none()
    }

    pub fn matches(&self, row: &ReconciledRow) -> bool {
        let performance = &row.row.performance;
        let attributes = &row.row.attributes;

        if let Some(account_id) = &self.account_id {
            if performance.account_id.as_deref() != Some(account_id.as_str()) {
                return false;
            }
        }
        if let Some(style_group) = &self.style_group {
            if &attributes.style_group != style_group {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &attributes.category != category {
                return false;
            }
        }
        if let Some(domain) = &self.domain {
            if &attributes.domain != domain {
                return false;
            }
        }
        if let Some(min_roas) = self.min_roas {
            if performance.metrics.roas < min_roas {
                return false;
            }
        }
        true
    }
}

/// Output of one successful invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub scope: ReportScope,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<ReconciledRow>,
    pub summary: ReportSummary,
}

impl Report {
    /// The batch formed by the displayed rows.
    pub fn batch(&self) -> ChangeBatch {
        ChangeBatch::from_rows(&self.rows)
    }

    /// Distinct account ids among the rows, in first-seen order.
    pub fn accounts(&self) -> Vec<String> {
        let mut accounts: Vec<String> = Vec::new();
        for row in &self.rows {
            if let Some(account_id) = &row.row.performance.account_id {
                if !accounts.contains(account_id) {
                    accounts.push(account_id.clone());
                }
            }
        }
        accounts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ReportOutcome {
    /// The selected date or range has no performance rows.
    NoData { scope: ReportScope },
    Ready(Report),
}

impl ReportOutcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            ReportOutcome::Ready(report) => Some(report),
            ReportOutcome::NoData { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<Report> {
        match self {
            ReportOutcome::Ready(report) => Some(report),
            ReportOutcome::NoData { .. } => None,
        }
    }
}
