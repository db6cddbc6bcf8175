//! Tabular input sources for adsync.
//!
//! This crate reads the performance and desired-state collections and hands
//! them to `adsync-core` as raw string rows. It implements the source traits
//! defined in the core crate:
//!
//! ```text
//!   CSV export files ──┐
//!                      ├──▶ PerformanceSourceTrait / DesiredStateSourceTrait
//!   in-memory rows  ───┘                    │
//!                                           ▼
//!                                  adsync-core pipeline
//! ```
//!
//! Header strings are the contract with the producer. Cells are passed through
//! untouched; trimming, coercion and date parsing happen in the core.

pub mod desired_state;
pub mod errors;
pub mod memory;
pub mod performance;
pub mod table;

pub use desired_state::CsvDesiredStateSource;
pub use errors::SheetsError;
pub use memory::InMemorySource;
pub use performance::CsvPerformanceSource;
pub use table::SheetTable;

pub use adsync_core::errors::{Error, Result, SourceError};
