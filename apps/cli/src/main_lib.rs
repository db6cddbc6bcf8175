use std::io::Write;
use std::sync::Arc;

use adsync_core::report::{format_currency, format_lag, format_margin, format_ratio_percent};
use adsync_core::{
    AdPlatformWriterTrait, BatchResult, ChangeState, ReconciliationService,
    ReconciliationServiceTrait, Report, ReportOutcome, ReportRequest, RequestContext,
};
use adsync_platform::{DryRunWriter, GraphApiClient};
use adsync_sheets::{CsvDesiredStateSource, CsvPerformanceSource};
use serde::Serialize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{ApplyMode, Config, OutputFormat};

pub fn init_tracing() {
    let log_format = std::env::var("ADSYNC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout carries only the report.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_service(config: &Config) -> anyhow::Result<ReconciliationService> {
    let writer: Arc<dyn AdPlatformWriterTrait> = match &config.platform {
        Some(platform) => Arc::new(GraphApiClient::new(
            &platform.base_url,
            &platform.api_version,
            &platform.access_token,
        )?),
        None => {
            if config.apply == ApplyMode::Batch {
                tracing::warn!("ADSYNC_PLATFORM_TOKEN is not set; batch apply is a dry run");
            }
            Arc::new(DryRunWriter)
        }
    };

    Ok(ReconciliationService::new(
        Arc::new(CsvPerformanceSource::new(&config.performance_csv)),
        Arc::new(CsvDesiredStateSource::new(&config.desired_state_csv)),
        writer,
        config.settings.clone(),
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunOutput<'a> {
    request_id: String,
    outcome: &'a ReportOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch: Option<&'a BatchResult>,
}

/// One invocation: build the report, optionally apply the batch, print.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let ctx = RequestContext::new().with_actor("adsync-cli");
    let service = build_service(config)?;
    let request = ReportRequest::new(config.scope).with_filter(config.filter.clone());

    tracing::info!("[{}] Building report for {}", ctx.tag(), config.scope);
    let outcome = service.build_report(&ctx, &request)?;

    let batch = match (&outcome, config.apply) {
        (ReportOutcome::Ready(report), ApplyMode::Batch) => {
            let result = service.apply_batch(&ctx, report);
            tracing::info!("[{}] {}", ctx.tag(), result.summary());
            Some(result)
        }
        _ => None,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Json => {
            let output = RunOutput {
                request_id: ctx.request_id.to_string(),
                outcome: &outcome,
                batch: batch.as_ref(),
            };
            serde_json::to_writer_pretty(&mut out, &output)?;
            writeln!(out)?;
        }
        OutputFormat::Table => match &outcome {
            ReportOutcome::NoData { scope } => writeln!(out, "No data for {}", scope)?,
            ReportOutcome::Ready(report) => {
                write_table(&mut out, report)?;
                if let Some(result) = &batch {
                    writeln!(out, "{}", result.summary())?;
                }
            }
        },
    }
    Ok(())
}

fn write_table(out: &mut impl Write, report: &Report) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<40} {:>12} {:>12} {:>12} {:>8} {:>8} {:>8}  Change",
        "Ad Name", "Spend", "Revenue", "Profit", "ROAS", "DBF", "2DBF"
    )?;
    for reconciled in &report.rows {
        let performance = &reconciled.row.performance;
        let (dbf, two_dbf) = format_lag(&performance.lag);
        let change = match &reconciled.change {
            ChangeState::NoChange => String::new(),
            ChangeState::Eligible(pending) => format!(
                "budget={:?} status={:?}",
                pending.budget_minor_units,
                pending.status_target.map(|s| s.as_str())
            ),
            ChangeState::Skipped(reason) => format!("skipped: {}", reason),
        };
        writeln!(
            out,
            "{:<40} {:>12} {:>12} {:>12} {:>8} {:>8} {:>8}  {}",
            performance.entity_name,
            format_currency(performance.spend),
            format_currency(performance.revenue),
            format_currency(performance.metrics.profit),
            format_ratio_percent(Some(performance.metrics.roas)),
            dbf,
            two_dbf,
            change
        )?;
    }

    let summary = &report.summary;
    writeln!(
        out,
        "{} rows | spend {} | revenue {} | profit {} | ROAS {} | margin {} | {} pending, {} skipped",
        summary.row_count,
        format_currency(summary.total_spend),
        format_currency(summary.total_revenue),
        format_currency(summary.total_profit),
        format_ratio_percent(Some(summary.overall_roas)),
        format_margin(summary.profit_margin_pct),
        summary.pending_changes,
        summary.skipped
    )
}
