//! adsync Core - Domain entities, calculators, and reconciliation services.
//!
//! This crate contains the reconciliation engine for ad performance data.
//! It is source-agnostic and defines the traits that the `sheets` crate
//! (tabular input) and the `platform` crate (ad platform writes) implement.

pub mod classification;
pub mod constants;
pub mod context;
pub mod desired_state;
pub mod errors;
pub mod metrics;
pub mod reconciliation;
pub mod report;
pub mod settings;
pub mod utils;

// Re-export the types most callers need
pub use context::RequestContext;
pub use metrics::*;
pub use reconciliation::*;
pub use report::*;
pub use settings::ReconcileSettings;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
