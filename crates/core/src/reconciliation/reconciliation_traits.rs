//! Write contract of the external ad platform.

use super::EntityUpdate;
use crate::context::RequestContext;
use crate::errors::Result;

/// Synchronous write access to the ad platform.
///
/// One call updates one entity. Implementations must not retry; a failed
/// call is reported once and left to the operator.
pub trait AdPlatformWriterTrait: Send + Sync {
    fn update_entity(
        &self,
        ctx: &RequestContext,
        platform_entity_id: &str,
        update: &EntityUpdate,
    ) -> Result<()>;
}
