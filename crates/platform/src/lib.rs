//! Ad platform writers for adsync.
//!
//! [`GraphApiClient`] writes budget and status updates over HTTP;
//! [`DryRunWriter`] logs them and succeeds without leaving the process.

pub mod client;
pub mod dry_run;

pub use client::{GraphApiClient, DEFAULT_API_VERSION};
pub use dry_run::DryRunWriter;
