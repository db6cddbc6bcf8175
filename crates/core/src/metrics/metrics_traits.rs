//! Source trait for the performance collection.

use super::RawPerformanceRow;
use crate::context::RequestContext;
use crate::errors::Result;

/// Full-table reader for performance rows.
///
/// Implementations return a snapshot of every row on every call; there is no
/// incremental read and no caching between invocations.
pub trait PerformanceSourceTrait: Send + Sync {
    fn load_performance(&self, ctx: &RequestContext) -> Result<Vec<RawPerformanceRow>>;
}
