//! Source trait for the desired-state collection.

use super::RawDesiredStateRow;
use crate::context::RequestContext;
use crate::errors::Result;

/// Full-table reader for operator-maintained desired state.
pub trait DesiredStateSourceTrait: Send + Sync {
    fn load_desired_state(&self, ctx: &RequestContext) -> Result<Vec<RawDesiredStateRow>>;
}
