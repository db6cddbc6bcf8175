//! Per-row change detection against live platform state.

use log::{debug, warn};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::{ChangeState, PendingChange, ReconciledRow, SkipReason};
use crate::desired_state::{DesiredStateRecord, EntityStatus, JoinedRow};
use crate::settings::ReconcileSettings;

/// Classifies one row. Rows are independent of each other.
///
/// - No desired-state match: `NoChange`.
/// - Match without a platform identifier: `Skipped(MissingIdentifier)`.
/// - Otherwise `Eligible` when the budget proposal or the status proposal
///   qualifies, `NoChange` when neither does.
pub fn detect_change(row: &JoinedRow, settings: &ReconcileSettings) -> ChangeState {
    let Some(desired) = row.desired.as_ref() else {
        return ChangeState::NoChange;
    };

    if !desired.has_platform_id() {
        debug!(
            "Entity '{}' has desired state but no platform identifier",
            desired.entity_name
        );
        return ChangeState::Skipped(SkipReason::MissingIdentifier);
    }

    let budget_minor_units = budget_change(desired, settings);
    let status_target = status_change(desired);

    if budget_minor_units.is_none() && status_target.is_none() {
        return ChangeState::NoChange;
    }

    ChangeState::Eligible(PendingChange {
        platform_entity_id: desired.platform_entity_id.clone(),
        entity_name: desired.entity_name.clone(),
        budget_minor_units,
        status_target,
    })
}

/// Runs change detection over the merged table.
pub fn reconcile_rows(rows: Vec<JoinedRow>, settings: &ReconcileSettings) -> Vec<ReconciledRow> {
    rows.into_iter()
        .map(|row| {
            let change = detect_change(&row, settings);
            ReconciledRow { row, change }
        })
        .collect()
}

/// Minor-unit budget to write, if the proposal is positive and moves the
/// budget by at least the tolerance.
///
/// A proposal of exactly `0` never qualifies, so budgets cannot be zeroed
/// through this path.
fn budget_change(desired: &DesiredStateRecord, settings: &ReconcileSettings) -> Option<i64> {
    let proposed = desired.desired_budget?;
    if proposed <= Decimal::ZERO {
        return None;
    }
    // An unrepresentable difference is larger than any tolerance
    if let Some(delta) = proposed.checked_sub(desired.current_budget) {
        if delta.abs() < settings.budget_tolerance {
            return None;
        }
    }

    // Decimal::round is half-to-even
    let minor = proposed
        .checked_mul(settings.minor_unit_factor())
        .map(|units| units.round());
    match minor.and_then(|units| units.to_i64()) {
        Some(units) => Some(units),
        None => {
            warn!(
                "Proposed budget {} for '{}' does not fit in minor units; ignoring",
                proposed, desired.entity_name
            );
            None
        }
    }
}

fn status_change(desired: &DesiredStateRecord) -> Option<EntityStatus> {
    let proposed = desired.desired_status?;
    if proposed == desired.current_status {
        return None;
    }
    if !proposed.is_writable() {
        debug!(
            "Proposed status {} for '{}' cannot be written; ignoring",
            proposed, desired.entity_name
        );
        return None;
    }
    Some(proposed)
}
