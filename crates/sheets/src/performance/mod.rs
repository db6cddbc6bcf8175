//! CSV source for the performance collection.

mod repository;

pub use repository::CsvPerformanceSource;
