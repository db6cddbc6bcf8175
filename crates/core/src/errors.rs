//! Core error types for adsync.
//!
//! Adapter crates (sheets, platform) convert their own failures into these
//! types so the reconciliation pipeline stays storage- and transport-agnostic.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the reconciliation engine.
///
/// Data-shape problems (bad numbers, missing join partners) never reach this
/// type; they are coerced to safe defaults where they occur. What remains are
/// I/O failures against the input store or the ad platform, and configuration
/// mistakes.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Source read failed: {0}")]
    Source(#[from] SourceError),

    #[error("Platform write failed: {0}")]
    Platform(#[from] PlatformError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Failures while reading one of the tabular collections.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The collection could not be opened or read.
    #[error("Failed to read collection '{collection}': {message}")]
    ReadFailed { collection: String, message: String },

    /// A header required by the producer contract is absent.
    #[error("Collection '{collection}' is missing required column '{column}'")]
    MissingColumn { collection: String, column: String },

    /// The collection is structurally unreadable (bad quoting, ragged rows).
    #[error("Malformed row {row} in collection '{collection}': {message}")]
    MalformedRow {
        collection: String,
        row: usize,
        message: String,
    },
}

/// Failures reported by the ad platform for a single write.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The platform rejected the write and explained why.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a usable response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The write was refused before leaving the process.
    #[error("Invalid write request: {0}")]
    InvalidRequest(String),
}

/// Validation errors for configuration and user-entered values.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
