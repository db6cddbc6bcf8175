//! Batch accumulation and per-item isolated apply.

use log::{debug, error, info, warn};
use std::collections::{HashMap, HashSet};

use super::{
    AdPlatformWriterTrait, ApplyOutcome, BatchResult, ChangeState, EntityUpdate, PendingChange,
    ReconciledRow, SkipReason, SkippedEntity,
};
use crate::context::RequestContext;

/// Pending changes accumulated across the displayed rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch {
    changes: Vec<PendingChange>,
    skipped: Vec<SkippedEntity>,
}

impl ChangeBatch {
    /// Collects eligible changes in row order.
    ///
    /// A platform entity is queued at most once. Rows repeating the same write
    /// for a queued identifier collapse into it; a row proposing a different
    /// write for a queued identifier is listed as skipped with
    /// [`SkipReason::DuplicateIdentifier`]. Skipped entities are listed once
    /// per entity name.
    pub fn from_rows(rows: &[ReconciledRow]) -> Self {
        let mut batch = ChangeBatch::default();
        let mut queued: HashMap<&str, EntityUpdate> = HashMap::new();
        let mut skipped_names: HashSet<&str> = HashSet::new();

        for row in rows {
            match &row.change {
                ChangeState::Eligible(change) => {
                    let update = change.to_update();
                    match queued.get(change.platform_entity_id.as_str()) {
                        None => {
                            queued.insert(change.platform_entity_id.as_str(), update);
                            batch.changes.push(change.clone());
                        }
                        Some(existing) if *existing == update => {
                            debug!(
                                "Entity {} ('{}') already queued with the same change",
                                change.platform_entity_id, change.entity_name
                            );
                        }
                        Some(_) => {
                            warn!(
                                "Entity {} ('{}') conflicts with a change already queued for that identifier",
                                change.platform_entity_id, change.entity_name
                            );
                            if skipped_names.insert(change.entity_name.as_str()) {
                                batch.skipped.push(SkippedEntity {
                                    entity_name: change.entity_name.clone(),
                                    reason: SkipReason::DuplicateIdentifier,
                                });
                            }
                        }
                    }
                }
                ChangeState::Skipped(reason) => {
                    let name = row.row.entity_name();
                    if skipped_names.insert(name) {
                        batch.skipped.push(SkippedEntity {
                            entity_name: name.to_string(),
                            reason: *reason,
                        });
                    }
                }
                ChangeState::NoChange => {}
            }
        }
        batch
    }

    pub fn changes(&self) -> &[PendingChange] {
        &self.changes
    }

    pub fn skipped(&self) -> &[SkippedEntity] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Attempts every change serially, in batch order.
    ///
    /// A failed write is recorded and the remaining writes still run; nothing
    /// already applied is rolled back.
    pub fn apply(&self, writer: &dyn AdPlatformWriterTrait, ctx: &RequestContext) -> BatchResult {
        let mut result = BatchResult::default();
        for entity in &self.skipped {
            result.add_skipped(&entity.entity_name, entity.reason);
        }

        for change in &self.changes {
            let outcome = apply_change(writer, ctx, change);
            result.add_outcome(change, outcome);
        }

        info!("[{}] Batch apply finished: {}", ctx.tag(), result.summary());
        result
    }
}

/// Writes a single pending change and reports its outcome.
pub fn apply_change(
    writer: &dyn AdPlatformWriterTrait,
    ctx: &RequestContext,
    change: &PendingChange,
) -> ApplyOutcome {
    if change.platform_entity_id.trim().is_empty() {
        return ApplyOutcome::Skipped {
            reason: SkipReason::MissingIdentifier,
        };
    }

    let update = change.to_update();
    if update.is_empty() {
        debug!(
            "[{}] Nothing to write for '{}'",
            ctx.tag(),
            change.entity_name
        );
        return ApplyOutcome::Skipped {
            reason: SkipReason::NothingToWrite,
        };
    }

    match writer.update_entity(ctx, &change.platform_entity_id, &update) {
        Ok(()) => {
            info!(
                "[{}] Updated {} ('{}'): budget={:?} status={:?}",
                ctx.tag(),
                change.platform_entity_id,
                change.entity_name,
                update.daily_budget,
                update.status.map(|s| s.as_str())
            );
            ApplyOutcome::Applied
        }
        Err(e) => {
            error!(
                "[{}] Failed to update {} ('{}'): {}",
                ctx.tag(),
                change.platform_entity_id,
                change.entity_name,
                e
            );
            ApplyOutcome::Failed {
                message: e.to_string(),
            }
        }
    }
}
