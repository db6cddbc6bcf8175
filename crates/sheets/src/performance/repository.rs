use adsync_core::constants::{
    COL_ACCOUNT_ID, COL_AD_NAME, COL_CHANNEL_ID, COL_DATE, COL_REVENUE, COL_SPEND, COL_STYLE_ID,
    PERFORMANCE_COLLECTION,
};
use adsync_core::metrics::{PerformanceSourceTrait, RawPerformanceRow};
use adsync_core::{RequestContext, Result};
use log::debug;
use std::path::PathBuf;

use crate::table::{cell, SheetTable};

/// Reads the performance export from a CSV file on every load.
pub struct CsvPerformanceSource {
    path: PathBuf,
}

impl CsvPerformanceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvPerformanceSource { path: path.into() }
    }

    pub fn rows_from_table(table: &SheetTable) -> Result<Vec<RawPerformanceRow>> {
        let date = table.required_column(COL_DATE)?;
        let ad_name = table.required_column(COL_AD_NAME)?;
        let channel_id = table.required_column(COL_CHANNEL_ID)?;
        let style_id = table.required_column(COL_STYLE_ID)?;
        let spend = table.required_column(COL_SPEND)?;
        let revenue = table.required_column(COL_REVENUE)?;
        let account_id = table.optional_column(COL_ACCOUNT_ID);

        Ok(table
            .rows()
            .iter()
            .map(|record| RawPerformanceRow {
                date: cell(record, date),
                ad_name: cell(record, ad_name),
                channel_id: cell(record, channel_id),
                style_id: cell(record, style_id),
                spend: cell(record, spend),
                revenue: cell(record, revenue),
                account_id: account_id
                    .map(|idx| cell(record, idx).trim().to_string())
                    .filter(|value| !value.is_empty()),
            })
            .collect())
    }
}

impl PerformanceSourceTrait for CsvPerformanceSource {
    fn load_performance(&self, ctx: &RequestContext) -> Result<Vec<RawPerformanceRow>> {
        let table = SheetTable::from_path(PERFORMANCE_COLLECTION, &self.path)?;
        let rows = Self::rows_from_table(&table)?;
        debug!(
            "[{}] Read {} performance rows from {}",
            ctx.tag(),
            rows.len(),
            self.path.display()
        );
        Ok(rows)
    }
}
