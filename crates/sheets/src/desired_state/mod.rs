//! CSV source for the operator-maintained desired-state collection.

mod repository;

pub use repository::CsvDesiredStateSource;
