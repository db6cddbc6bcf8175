pub mod batch;
pub mod change_detection;
pub mod reconciliation_model;
pub mod reconciliation_service;
pub mod reconciliation_traits;

#[cfg(test)]
mod batch_tests;

pub use batch::{apply_change, ChangeBatch};
pub use change_detection::{detect_change, reconcile_rows};
pub use reconciliation_model::*;
pub use reconciliation_service::{ReconciliationService, ReconciliationServiceTrait, ReportRequest};
pub use reconciliation_traits::AdPlatformWriterTrait;
