//! In-memory collections, for tests and for callers that already hold rows.

use adsync_core::desired_state::{DesiredStateSourceTrait, RawDesiredStateRow};
use adsync_core::metrics::{PerformanceSourceTrait, RawPerformanceRow};
use adsync_core::{RequestContext, Result};
use std::sync::RwLock;

/// Serves both collections from memory. Each load returns a snapshot copy.
#[derive(Debug, Default)]
pub struct InMemorySource {
    performance: RwLock<Vec<RawPerformanceRow>>,
    desired_state: RwLock<Vec<RawDesiredStateRow>>,
}

impl InMemorySource {
    pub fn new(
        performance: Vec<RawPerformanceRow>,
        desired_state: Vec<RawDesiredStateRow>,
    ) -> Self {
        Self {
            performance: RwLock::new(performance),
            desired_state: RwLock::new(desired_state),
        }
    }

    pub fn replace_performance(&self, rows: Vec<RawPerformanceRow>) {
        let mut guard = self
            .performance
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = rows;
    }

    pub fn replace_desired_state(&self, rows: Vec<RawDesiredStateRow>) {
        let mut guard = self
            .desired_state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = rows;
    }
}

impl PerformanceSourceTrait for InMemorySource {
    fn load_performance(&self, _ctx: &RequestContext) -> Result<Vec<RawPerformanceRow>> {
        let guard = self
            .performance
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(guard.clone())
    }
}

impl DesiredStateSourceTrait for InMemorySource {
    fn load_desired_state(&self, _ctx: &RequestContext) -> Result<Vec<RawDesiredStateRow>> {
        let guard = self
            .desired_state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(guard.clone())
    }
}
