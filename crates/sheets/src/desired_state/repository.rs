use adsync_core::constants::{
    COL_AD_NAME, COL_AD_SET_ID, COL_AD_STATUS, COL_CURRENT_BUDGET, COL_CURRENT_STATUS,
    COL_NEW_BUDGET, COL_NEW_STATUS, DESIRED_STATE_COLLECTION,
};
use adsync_core::desired_state::{DesiredStateSourceTrait, RawDesiredStateRow};
use adsync_core::{RequestContext, Result};
use log::debug;
use std::path::PathBuf;

use crate::table::{cell, SheetTable};

/// Reads the desired-state sheet from a CSV file on every load.
pub struct CsvDesiredStateSource {
    path: PathBuf,
}

impl CsvDesiredStateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvDesiredStateSource { path: path.into() }
    }

    /// The status column is `Ad Status`, or `Current Status` on older sheets.
    pub fn rows_from_table(table: &SheetTable) -> Result<Vec<RawDesiredStateRow>> {
        let ad_name = table.required_column(COL_AD_NAME)?;
        let ad_set_id = table.required_column(COL_AD_SET_ID)?;
        let current_status = table.first_of_columns(&[COL_AD_STATUS, COL_CURRENT_STATUS])?;
        let current_budget = table.required_column(COL_CURRENT_BUDGET)?;
        let new_budget = table.required_column(COL_NEW_BUDGET)?;
        let new_status = table.required_column(COL_NEW_STATUS)?;

        Ok(table
            .rows()
            .iter()
            .map(|record| RawDesiredStateRow {
                ad_name: cell(record, ad_name),
                ad_set_id: cell(record, ad_set_id),
                current_status: cell(record, current_status),
                current_budget: cell(record, current_budget),
                new_budget: cell(record, new_budget),
                new_status: cell(record, new_status),
            })
            .collect())
    }
}

impl DesiredStateSourceTrait for CsvDesiredStateSource {
    fn load_desired_state(&self, ctx: &RequestContext) -> Result<Vec<RawDesiredStateRow>> {
        let table = SheetTable::from_path(DESIRED_STATE_COLLECTION, &self.path)?;
        let rows = Self::rows_from_table(&table)?;
        debug!(
            "[{}] Read {} desired-state rows from {}",
            ctx.tag(),
            rows.len(),
            self.path.display()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adsync_core::desired_state::{DesiredStateTable, EntityStatus};
    use adsync_core::errors::{Error, SourceError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_quoted_identifier() {
        let file = write_csv(
            "Ad Name,Ad Set ID,Ad Status,Current Budget,New Budget,New Status\n\
             A,\"'12345'\",ACTIVE,50,60,\n",
        );

        let rows = CsvDesiredStateSource::new(file.path())
            .load_desired_state(&RequestContext::new())
            .unwrap();
        let table = DesiredStateTable::from_raw(&rows);
        let record = table.get("A").unwrap();

        assert_eq!(rows[0].ad_set_id, "'12345'");
        assert_eq!(record.platform_entity_id, "12345");
        assert_eq!(record.current_status, EntityStatus::Active);
        assert_eq!(record.desired_status, None);
    }

    #[test]
    fn test_accepts_current_status_header() {
        let file = write_csv(
            "Ad Name,Ad Set ID,Current Status,Current Budget,New Budget,New Status\n\
             A,1,PAUSED,50,,ACTIVE\n",
        );

        let rows = CsvDesiredStateSource::new(file.path())
            .load_desired_state(&RequestContext::new())
            .unwrap();

        assert_eq!(rows[0].current_status, "PAUSED");
        assert_eq!(rows[0].new_status, "ACTIVE");
        assert_eq!(rows[0].new_budget, "");
    }

    #[test]
    fn test_missing_status_header_names_ad_status() {
        let file = write_csv("Ad Name,Ad Set ID,Current Budget,New Budget,New Status\n");

        let err = CsvDesiredStateSource::new(file.path())
            .load_desired_state(&RequestContext::new())
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Source(SourceError::MissingColumn { ref column, .. }) if column == "Ad Status"
        ));
    }
}
