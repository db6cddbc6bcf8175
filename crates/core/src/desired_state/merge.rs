//! Left join of classified metrics against the desired-state table.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{DesiredStateRecord, DesiredStateTable};
use crate::classification::{CategoricalAttributes, ClassifiedRow};
use crate::metrics::PerformanceRow;

/// The unit the reconciliation stage works on.
///
/// `desired` is `None` when the entity has no desired-state row; such rows are
/// still reported but carry no write obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedRow {
    #[serde(flatten)]
    pub performance: PerformanceRow,
    pub attributes: CategoricalAttributes,
    pub desired: Option<DesiredStateRecord>,
}

impl JoinedRow {
    pub fn entity_name(&self) -> &str {
        &self.performance.entity_name
    }
}

/// Attaches desired state by entity name and orders the result by
/// `(style_group, entity_name)`. Every input row is retained.
pub fn merge_desired_state(rows: Vec<ClassifiedRow>, table: &DesiredStateTable) -> Vec<JoinedRow> {
    let mut matched = 0usize;
    let mut joined: Vec<JoinedRow> = rows
        .into_iter()
        .map(|row| {
            let desired = table.get(&row.performance.entity_name).cloned();
            if desired.is_some() {
                matched += 1;
            }
            JoinedRow {
                performance: row.performance,
                attributes: row.attributes,
                desired,
            }
        })
        .collect();

    debug!(
        "Desired-state merge: {} of {} rows matched",
        matched,
        joined.len()
    );

    // Stable: rows sharing both fields keep their upstream order
    joined.sort_by(|a, b| {
        a.attributes
            .style_group
            .cmp(&b.attributes.style_group)
            .then_with(|| a.performance.entity_name.cmp(&b.performance.entity_name))
    });
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::classify_rows;
    use crate::desired_state::RawDesiredStateRow;
    use crate::metrics::{derive_metrics, LagIndicators};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn perf(name: &str, channel: &str) -> PerformanceRow {
        PerformanceRow {
            entity_name: name.to_string(),
            channel_id: channel.to_string(),
            style_id: "st".to_string(),
            account_id: None,
            spend: dec!(10),
            revenue: dec!(20),
            metrics: derive_metrics(dec!(10), dec!(20)),
            lag: LagIndicators::NotApplicable,
        }
    }

    fn desired(name: &str, budget: &str) -> RawDesiredStateRow {
        RawDesiredStateRow {
            ad_name: name.to_string(),
            ad_set_id: "1".to_string(),
            current_status: "ACTIVE".to_string(),
            current_budget: budget.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unmatched_rows_are_kept_with_null_state() {
        let table = DesiredStateTable::from_raw(&[desired("B-x", "50")]);
        let rows = classify_rows(vec![perf("A-x", "c"), perf("B-x", "c")]);

        let joined = merge_desired_state(rows, &table);

        assert_eq!(joined.len(), 2);
        assert!(joined[0].desired.is_none());
        assert_eq!(
            joined[1].desired.as_ref().map(|d| d.current_budget),
            Some(dec!(50))
        );
    }

    #[test]
    fn test_non_numeric_current_budget_is_zero() {
        let table = DesiredStateTable::from_raw(&[desired("A", "--")]);
        let joined = merge_desired_state(classify_rows(vec![perf("A", "c")]), &table);
        assert_eq!(
            joined[0].desired.as_ref().map(|d| d.current_budget),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn test_sorted_by_style_group_then_name_case_sensitive() {
        let rows = classify_rows(vec![
            perf("b-2", "c"),
            perf("B-9", "c"),
            perf("a-1", "c"),
            perf("B-1", "c"),
        ]);

        let joined = merge_desired_state(rows, &DesiredStateTable::default());
        let names: Vec<&str> = joined.iter().map(|r| r.entity_name()).collect();

        assert_eq!(names, vec!["B-1", "B-9", "a-1", "b-2"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let rows = classify_rows(vec![perf("A", "ch2"), perf("A", "ch1")]);
        let joined = merge_desired_state(rows, &DesiredStateTable::default());
        assert_eq!(joined[0].performance.channel_id, "ch2");
        assert_eq!(joined[1].performance.channel_id, "ch1");
    }
}
