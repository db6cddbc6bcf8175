//! Desired-state domain models.

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::metrics::{coerce_decimal, parse_decimal};
use crate::utils::text_utils::{non_blank, normalize_key, normalize_platform_id};

/// One row of the desired-state collection exactly as the store returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDesiredStateRow {
    pub ad_name: String,
    pub ad_set_id: String,
    pub current_status: String,
    pub current_budget: String,
    pub new_budget: String,
    pub new_status: String,
}

/// Delivery status of an entity on the ad platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Active,
    Paused,
    Deleted,
    Unknown,
}

impl EntityStatus {
    /// Case-insensitive, whitespace-trimmed parse. Anything unrecognized is
    /// `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => EntityStatus::Active,
            "PAUSED" => EntityStatus::Paused,
            "DELETED" => EntityStatus::Deleted,
            _ => EntityStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Active => "ACTIVE",
            EntityStatus::Paused => "PAUSED",
            EntityStatus::Deleted => "DELETED",
            EntityStatus::Unknown => "UNKNOWN",
        }
    }

    /// Only these statuses can be sent to the platform.
    pub fn is_writable(&self) -> bool {
        matches!(self, EntityStatus::Active | EntityStatus::Paused)
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator-maintained target state for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredStateRecord {
    pub entity_name: String,
    /// Normalized platform handle; empty when the entity cannot be written.
    pub platform_entity_id: String,
    pub current_status: EntityStatus,
    pub current_budget: Decimal,
    pub desired_budget: Option<Decimal>,
    pub desired_status: Option<EntityStatus>,
}

impl DesiredStateRecord {
    pub fn from_raw(raw: &RawDesiredStateRow) -> Self {
        let desired_budget = non_blank(&raw.new_budget).and_then(|text| {
            let parsed = parse_decimal(text);
            if parsed.is_none() {
                debug!(
                    "Ignoring non-numeric new budget '{}' for '{}'",
                    text, raw.ad_name
                );
            }
            parsed
        });

        Self {
            entity_name: normalize_key(&raw.ad_name),
            platform_entity_id: normalize_platform_id(&raw.ad_set_id),
            current_status: EntityStatus::parse(&raw.current_status),
            current_budget: coerce_decimal(&raw.current_budget),
            desired_budget,
            desired_status: non_blank(&raw.new_status).map(EntityStatus::parse),
        }
    }

    pub fn has_platform_id(&self) -> bool {
        !self.platform_entity_id.is_empty()
    }
}

/// Desired-state records keyed by normalized entity name.
#[derive(Debug, Clone, Default)]
pub struct DesiredStateTable {
    records: HashMap<String, DesiredStateRecord>,
}

impl DesiredStateTable {
    /// Builds the table from raw rows. The first row per entity name wins;
    /// rows with a blank name are ignored.
    pub fn from_raw(rows: &[RawDesiredStateRow]) -> Self {
        let mut records: HashMap<String, DesiredStateRecord> = HashMap::with_capacity(rows.len());
        let mut duplicates = 0usize;

        for raw in rows {
            let record = DesiredStateRecord::from_raw(raw);
            if record.entity_name.is_empty() {
                continue;
            }
            if records.contains_key(&record.entity_name) {
                duplicates += 1;
                continue;
            }
            records.insert(record.entity_name.clone(), record);
        }

        if duplicates > 0 {
            warn!(
                "Dropped {} duplicate desired-state rows (first occurrence kept)",
                duplicates
            );
        }
        Self { records }
    }

    pub fn get(&self, entity_name: &str) -> Option<&DesiredStateRecord> {
        self.records.get(entity_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
