pub mod formatting;
pub mod report_model;
pub mod summary;

pub use formatting::*;
pub use report_model::*;
pub use summary::{summarize, ReportSummary};
