//! Totals over the displayed rows.

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::metrics::{calculate_roas, checked_total};
use crate::reconciliation::{ChangeBatch, ReconciledRow};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub row_count: usize,
    pub total_spend: Decimal,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    /// `total_revenue / total_spend`, `0` without spend.
    pub overall_roas: Decimal,
    /// `total_profit / total_spend * 100`, absent without spend.
    pub profit_margin_pct: Option<Decimal>,
    pub pending_changes: usize,
    pub skipped: usize,
}

pub fn summarize(rows: &[ReconciledRow]) -> ReportSummary {
    let total_spend = total_or_zero("spend", rows.iter().map(|r| r.row.performance.spend));
    let total_revenue = total_or_zero("revenue", rows.iter().map(|r| r.row.performance.revenue));
    let total_profit = total_revenue
        .checked_sub(total_spend)
        .unwrap_or(Decimal::ZERO);

    let profit_margin_pct = if total_spend.is_zero() {
        None
    } else {
        total_profit
            .checked_div(total_spend)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    };

    let batch = ChangeBatch::from_rows(rows);

    ReportSummary {
        row_count: rows.len(),
        total_spend,
        total_revenue,
        total_profit,
        overall_roas: calculate_roas(total_spend, total_revenue),
        profit_margin_pct,
        pending_changes: batch.len(),
        skipped: batch.skipped().len(),
    }
}

fn total_or_zero(label: &str, amounts: impl Iterator<Item = Decimal>) -> Decimal {
    checked_total(amounts).unwrap_or_else(|| {
        warn!("Total {} overflows; reporting it as 0", label);
        Decimal::ZERO
    })
}
