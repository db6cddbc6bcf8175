//! Unit tests for batch accumulation and apply.

use super::*;
use crate::classification::CategoricalAttributes;
use crate::context::RequestContext;
use crate::desired_state::{EntityStatus, JoinedRow};
use crate::errors::{Error, PlatformError, Result};
use crate::metrics::{derive_metrics, LagIndicators, PerformanceRow};
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::sync::Mutex;

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default)]
struct MockPlatformWriter {
    failing_ids: HashSet<String>,
    calls: Mutex<Vec<(String, EntityUpdate)>>,
}

impl MockPlatformWriter {
    fn failing(ids: &[&str]) -> Self {
        Self {
            failing_ids: ids.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn called_ids(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl AdPlatformWriterTrait for MockPlatformWriter {
    fn update_entity(
        &self,
        _ctx: &RequestContext,
        platform_entity_id: &str,
        update: &EntityUpdate,
    ) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((platform_entity_id.to_string(), *update));
        if self.failing_ids.contains(platform_entity_id) {
            return Err(Error::Platform(PlatformError::Rejected(format!(
                "Invalid parameter for {}",
                platform_entity_id
            ))));
        }
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn change(id: &str, name: &str, budget: Option<i64>) -> PendingChange {
    PendingChange {
        platform_entity_id: id.to_string(),
        entity_name: name.to_string(),
        budget_minor_units: budget,
        status_target: None,
    }
}

fn reconciled(name: &str, state: ChangeState) -> ReconciledRow {
    ReconciledRow {
        row: JoinedRow {
            performance: PerformanceRow {
                entity_name: name.to_string(),
                channel_id: "c".to_string(),
                style_id: "s".to_string(),
                account_id: None,
                spend: dec!(1),
                revenue: dec!(1),
                metrics: derive_metrics(dec!(1), dec!(1)),
                lag: LagIndicators::NotApplicable,
            },
            attributes: CategoricalAttributes::from_entity_name(name),
            desired: None,
        },
        change: state,
    }
}

fn eligible(id: &str, name: &str) -> ReconciledRow {
    reconciled(name, ChangeState::Eligible(change(id, name, Some(1000))))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_batch_collects_only_eligible_rows() {
    let rows = vec![
        eligible("1", "A"),
        reconciled("B", ChangeState::NoChange),
        reconciled("C", ChangeState::Skipped(SkipReason::MissingIdentifier)),
        eligible("4", "D"),
    ];

    let batch = ChangeBatch::from_rows(&rows);

    assert_eq!(batch.len(), 2);
    assert_eq!(batch.changes()[0].entity_name, "A");
    assert_eq!(batch.changes()[1].entity_name, "D");
    assert_eq!(batch.skipped().len(), 1);
    assert_eq!(batch.skipped()[0].entity_name, "C");
}

#[test]
fn test_batch_queues_each_platform_entity_once() {
    let rows = vec![eligible("1", "A"), eligible("1", "A"), eligible("2", "B")];
    let batch = ChangeBatch::from_rows(&rows);
    assert_eq!(batch.len(), 2);
    assert!(batch.skipped().is_empty());
}

#[test]
fn test_conflicting_changes_for_one_identifier_are_reported() {
    let rows = vec![
        reconciled("A", ChangeState::Eligible(change("777", "A", Some(2000)))),
        reconciled("B", ChangeState::Eligible(change("777", "B", Some(5000)))),
        // Same write under another name collapses into the queued change
        reconciled("C", ChangeState::Eligible(change("777", "C", Some(2000)))),
    ];
    let writer = MockPlatformWriter::default();

    let batch = ChangeBatch::from_rows(&rows);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.changes()[0].entity_name, "A");
    assert_eq!(
        batch.skipped(),
        &[SkippedEntity {
            entity_name: "B".to_string(),
            reason: SkipReason::DuplicateIdentifier,
        }]
    );

    let result = batch.apply(&writer, &RequestContext::new());
    assert_eq!(result.succeeded, 1);
    assert_eq!(result.failed, 0);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason, SkipReason::DuplicateIdentifier);
    assert!(result.summary().contains("1 skipped"));
    let calls = writer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.daily_budget, Some(2000));
}

#[test]
fn test_empty_batch() {
    let batch = ChangeBatch::from_rows(&[reconciled("A", ChangeState::NoChange)]);
    assert!(batch.is_empty());

    let writer = MockPlatformWriter::default();
    let result = batch.apply(&writer, &RequestContext::new());
    assert_eq!(result, BatchResult::default());
    assert!(writer.called_ids().is_empty());
}

#[test]
fn test_one_failure_does_not_abort_siblings() {
    let rows = vec![
        eligible("1", "A"),
        eligible("2", "B"),
        eligible("3", "K"),
        eligible("4", "D"),
    ];
    let writer = MockPlatformWriter::failing(&["3"]);

    let result = ChangeBatch::from_rows(&rows).apply(&writer, &RequestContext::new());

    assert_eq!(result.succeeded, 3);
    assert_eq!(result.failed, 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].entity_name, "K");
    assert!(result.failures[0].message.contains("Invalid parameter for 3"));
    assert!(!result.is_success());
    // Writes are serial, in row order, and the one after the failure still ran
    assert_eq!(writer.called_ids(), vec!["1", "2", "3", "4"]);
}

#[test]
fn test_skipped_entities_are_reported_but_not_failures() {
    let rows = vec![
        eligible("1", "A"),
        reconciled("B", ChangeState::Skipped(SkipReason::MissingIdentifier)),
    ];
    let writer = MockPlatformWriter::default();

    let result = ChangeBatch::from_rows(&rows).apply(&writer, &RequestContext::new());

    assert_eq!(result.succeeded, 1);
    assert_eq!(result.failed, 0);
    assert!(result.is_success());
    assert_eq!(
        result.skipped,
        vec![SkippedEntity {
            entity_name: "B".to_string(),
            reason: SkipReason::MissingIdentifier,
        }]
    );
    assert!(result.summary().contains("1 skipped"));
}

#[test]
fn test_apply_change_passes_update_verbatim() {
    let writer = MockPlatformWriter::default();
    let mut pending = change("9", "Z", Some(2550));
    pending.status_target = Some(EntityStatus::Paused);

    let outcome = apply_change(&writer, &RequestContext::new(), &pending);

    assert_eq!(outcome, ApplyOutcome::Applied);
    let calls = writer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].1,
        EntityUpdate {
            daily_budget: Some(2550),
            status: Some(EntityStatus::Paused),
        }
    );
}

#[test]
fn test_apply_change_reports_failure() {
    let writer = MockPlatformWriter::failing(&["9"]);
    let outcome = apply_change(&writer, &RequestContext::new(), &change("9", "Z", Some(1)));
    assert!(matches!(outcome, ApplyOutcome::Failed { ref message } if message.contains("Invalid parameter")));
}

#[test]
fn test_apply_change_without_identifier_is_skipped() {
    let writer = MockPlatformWriter::default();
    let outcome = apply_change(&writer, &RequestContext::new(), &change("  ", "Z", Some(1)));
    assert_eq!(
        outcome,
        ApplyOutcome::Skipped {
            reason: SkipReason::MissingIdentifier
        }
    );
    assert!(writer.called_ids().is_empty());
}

#[test]
fn test_apply_change_with_nothing_to_write_does_not_call_platform() {
    let writer = MockPlatformWriter::default();
    let outcome = apply_change(&writer, &RequestContext::new(), &change("9", "Z", None));
    assert_eq!(
        outcome,
        ApplyOutcome::Skipped {
            reason: SkipReason::NothingToWrite
        }
    );
    assert!(!outcome.is_applied());
    assert!(writer.called_ids().is_empty());
}

#[test]
fn test_batch_does_not_count_empty_changes_as_applied() {
    let rows = vec![
        eligible("1", "A"),
        reconciled("Z", ChangeState::Eligible(change("9", "Z", None))),
    ];
    let writer = MockPlatformWriter::default();

    let result = ChangeBatch::from_rows(&rows).apply(&writer, &RequestContext::new());

    assert_eq!(result.succeeded, 1);
    assert_eq!(result.failed, 0);
    assert_eq!(
        result.skipped,
        vec![SkippedEntity {
            entity_name: "Z".to_string(),
            reason: SkipReason::NothingToWrite,
        }]
    );
    assert_eq!(writer.called_ids(), vec!["1"]);
}
