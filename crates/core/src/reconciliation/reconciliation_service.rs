//! Pipeline entry point: one invocation from raw rows to a report, plus the
//! two apply modes.

use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

use super::{
    apply_change, reconcile_rows, AdPlatformWriterTrait, ApplyOutcome, BatchResult, ChangeBatch,
    PendingChange,
};
use crate::classification::classify_rows;
use crate::context::RequestContext;
use crate::desired_state::{merge_desired_state, DesiredStateSourceTrait, DesiredStateTable};
use crate::errors::Result;
use crate::metrics::{
    aggregate_range, ingest_performance, join_lagged, PerformanceRow, PerformanceSourceTrait,
    ReportScope,
};
use crate::report::{summarize, Report, ReportOutcome, RowFilter};
use crate::settings::ReconcileSettings;

/// What the caller selected for this invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub scope: ReportScope,
    pub filter: RowFilter,
}

impl ReportRequest {
    pub fn new(scope: ReportScope) -> Self {
        Self {
            scope,
            filter: RowFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: RowFilter) -> Self {
        self.filter = filter;
        self
    }
}

pub trait ReconciliationServiceTrait: Send + Sync {
    /// Reads both collections and runs the full pipeline for the request.
    ///
    /// Returns [`ReportOutcome::NoData`] when the scope selects no rows; in
    /// that case the desired-state collection is not read.
    fn build_report(&self, ctx: &RequestContext, request: &ReportRequest) -> Result<ReportOutcome>;

    /// Writes one pending change immediately, independent of any batch.
    fn apply_change(&self, ctx: &RequestContext, change: &PendingChange) -> ApplyOutcome;

    /// Writes every pending change of the report's rows with per-item isolation.
    fn apply_batch(&self, ctx: &RequestContext, report: &Report) -> BatchResult;
}

pub struct ReconciliationService {
    performance_source: Arc<dyn PerformanceSourceTrait>,
    desired_state_source: Arc<dyn DesiredStateSourceTrait>,
    platform_writer: Arc<dyn AdPlatformWriterTrait>,
    settings: ReconcileSettings,
}

impl ReconciliationService {
    pub fn new(
        performance_source: Arc<dyn PerformanceSourceTrait>,
        desired_state_source: Arc<dyn DesiredStateSourceTrait>,
        platform_writer: Arc<dyn AdPlatformWriterTrait>,
        settings: ReconcileSettings,
    ) -> Self {
        Self {
            performance_source,
            desired_state_source,
            platform_writer,
            settings,
        }
    }

    pub fn settings(&self) -> &ReconcileSettings {
        &self.settings
    }

    fn scoped_rows(&self, ctx: &RequestContext, scope: ReportScope) -> Result<Vec<PerformanceRow>> {
        let raw = self.performance_source.load_performance(ctx)?;
        let records = ingest_performance(&raw);
        debug!(
            "[{}] Ingested {} of {} performance rows",
            ctx.tag(),
            records.len(),
            raw.len()
        );

        Ok(match scope {
            ReportScope::Day { date } => join_lagged(&records, date),
            ReportScope::Range { start, end } => aggregate_range(&records, start, end),
        })
    }
}

impl ReconciliationServiceTrait for ReconciliationService {
    fn build_report(&self, ctx: &RequestContext, request: &ReportRequest) -> Result<ReportOutcome> {
        let started = Instant::now();
        let scope = request.scope;

        let rows = self.scoped_rows(ctx, scope)?;
        if rows.is_empty() {
            info!("[{}] No performance data for {}", ctx.tag(), scope);
            return Ok(ReportOutcome::NoData { scope });
        }

        let desired_raw = self.desired_state_source.load_desired_state(ctx)?;
        let desired = DesiredStateTable::from_raw(&desired_raw);

        let joined = merge_desired_state(classify_rows(rows), &desired);
        let reconciled = reconcile_rows(joined, &self.settings);
        let total_rows = reconciled.len();

        let displayed: Vec<_> = reconciled
            .into_iter()
            .filter(|row| request.filter.matches(row))
            .collect();

        let summary = summarize(&displayed);
        info!(
            "[{}] Report for {}: {} rows ({} after filters), {} pending, {} skipped in {:?}",
            ctx.tag(),
            scope,
            total_rows,
            displayed.len(),
            summary.pending_changes,
            summary.skipped,
            started.elapsed()
        );

        Ok(ReportOutcome::Ready(Report {
            scope,
            generated_at: Utc::now(),
            rows: displayed,
            summary,
        }))
    }

    fn apply_change(&self, ctx: &RequestContext, change: &PendingChange) -> ApplyOutcome {
        apply_change(self.platform_writer.as_ref(), ctx, change)
    }

    fn apply_batch(&self, ctx: &RequestContext, report: &Report) -> BatchResult {
        let batch = ChangeBatch::from_rows(&report.rows);
        info!(
            "[{}] Applying batch of {} changes ({} skipped)",
            ctx.tag(),
            batch.len(),
            batch.skipped().len()
        );
        batch.apply(self.platform_writer.as_ref(), ctx)
    }
}
