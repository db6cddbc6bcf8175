use adsync_core::{AdPlatformWriterTrait, EntityUpdate, RequestContext, Result};
use log::info;

/// Writer used when no platform credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunWriter;

impl AdPlatformWriterTrait for DryRunWriter {
    fn update_entity(
        &self,
        ctx: &RequestContext,
        platform_entity_id: &str,
        update: &EntityUpdate,
    ) -> Result<()> {
        info!(
            "[{}] [DryRun] Would update {}: daily_budget={:?} status={:?}",
            ctx.tag(),
            platform_entity_id,
            update.daily_budget,
            update.status.map(|s| s.as_str())
        );
        Ok(())
    }
}
