//! Sheet-specific error types.
//!
//! These wrap `std::io` and `csv` failures and are converted into
//! `adsync_core::Error` before leaving the crate.

use adsync_core::errors::{Error, SourceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Failed to read '{collection}': {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse row {row} of '{collection}': {source}")]
    Csv {
        collection: String,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("'{collection}' is missing required column '{column}'")]
    MissingColumn { collection: String, column: String },

    #[error("'{collection}' has no header row")]
    Empty { collection: String },
}

impl From<SheetsError> for Error {
    fn from(err: SheetsError) -> Self {
        match err {
            SheetsError::Io { collection, source } => Error::Source(SourceError::ReadFailed {
                collection,
                message: source.to_string(),
            }),
            SheetsError::Csv {
                collection,
                row,
                source,
            } => Error::Source(SourceError::MalformedRow {
                collection,
                row,
                message: source.to_string(),
            }),
            SheetsError::MissingColumn { collection, column } => {
                Error::Source(SourceError::MissingColumn { collection, column })
            }
            SheetsError::Empty { collection } => Error::Source(SourceError::ReadFailed {
                collection,
                message: "no header row".to_string(),
            }),
        }
    }
}
