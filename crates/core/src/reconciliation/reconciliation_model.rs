//! Pending-change and apply-result models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::desired_state::{EntityStatus, JoinedRow};

/// Parameters of one platform write. `None` leaves the attribute unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityUpdate {
    /// Daily budget in billing-currency minor units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_budget: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

impl EntityUpdate {
    pub fn is_empty(&self) -> bool {
        self.daily_budget.is_none() && self.status.is_none()
    }
}

/// A write the platform still has to receive for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingChange {
    pub platform_entity_id: String,
    pub entity_name: String,
    pub budget_minor_units: Option<i64>,
    pub status_target: Option<EntityStatus>,
}

impl PendingChange {
    pub fn to_update(&self) -> EntityUpdate {
        EntityUpdate {
            daily_budget: self.budget_minor_units,
            status: self.status_target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// The desired-state row has no usable platform identifier.
    MissingIdentifier,
    /// Another entity already queued a different change for the same identifier.
    DuplicateIdentifier,
    /// The change carries neither a budget nor a status.
    NothingToWrite,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingIdentifier => write!(f, "missing identifier"),
            SkipReason::DuplicateIdentifier => {
                write!(f, "identifier already queued with a different change")
            }
            SkipReason::NothingToWrite => write!(f, "nothing to write"),
        }
    }
}

/// Write obligation of a row relative to live platform state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "camelCase")]
pub enum ChangeState {
    NoChange,
    Eligible(PendingChange),
    Skipped(SkipReason),
}

impl ChangeState {
    pub fn pending(&self) -> Option<&PendingChange> {
        match self {
            ChangeState::Eligible(change) => Some(change),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ChangeState::Skipped(_))
    }
}

/// A joined row together with its change state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledRow {
    #[serde(flatten)]
    pub row: JoinedRow,
    pub change: ChangeState,
}

/// Result of one write attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ApplyOutcome {
    Applied,
    Failed { message: String },
    Skipped { reason: SkipReason },
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyFailure {
    pub entity_name: String,
    pub platform_entity_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntity {
    pub entity_name: String,
    pub reason: SkipReason,
}

/// Aggregate result of a batch apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Number of writes the platform accepted.
    pub succeeded: usize,
    /// Number of writes that failed.
    pub failed: usize,
    /// Entity name and error text for every failed write.
    pub failures: Vec<ApplyFailure>,
    /// Entities excluded before any write was attempted. Never counted as failures.
    pub skipped: Vec<SkippedEntity>,
}

impl BatchResult {
    /// Check if every attempted write succeeded.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn summary(&self) -> String {
        let mut text = if self.is_success() {
            format!("Applied {} changes successfully", self.succeeded)
        } else {
            format!(
                "Applied {} changes with {} failures",
                self.succeeded, self.failed
            )
        };
        if !self.skipped.is_empty() {
            text.push_str(&format!(" ({} skipped)", self.skipped.len()));
        }
        text
    }

    pub(crate) fn add_outcome(&mut self, change: &PendingChange, outcome: ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied => self.succeeded += 1,
            ApplyOutcome::Failed { message } => {
                self.failed += 1;
                self.failures.push(ApplyFailure {
                    entity_name: change.entity_name.clone(),
                    platform_entity_id: change.platform_entity_id.clone(),
                    message,
                });
            }
            ApplyOutcome::Skipped { reason } => self.add_skipped(&change.entity_name, reason),
        }
    }

    pub(crate) fn add_skipped(&mut self, entity_name: &str, reason: SkipReason) {
        self.skipped.push(SkippedEntity {
            entity_name: entity_name.to_string(),
            reason,
        });
    }
}
