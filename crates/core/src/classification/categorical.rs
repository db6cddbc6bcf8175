//! Classification attributes derived from an entity name.
//!
//! Entity names follow a loose positional convention, e.g.
//! `US-ch4512_Insurance_R_CarQuotes_v2`:
//!
//! | Attribute     | Rule                                             | Example     |
//! |---------------|--------------------------------------------------|-------------|
//! | `style_group` | text before the first `-`                        | `US`        |
//! | `domain`      | segment after a `-ch<digits>_` marker            | `Insurance` |
//! | `category`    | segment after a lone `M`/`R` token between `_`s  | `CarQuotes` |
//!
//! Attributes are filtering aids; an unmatched pattern yields `UNKNOWN`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_ATTRIBUTE;
use crate::metrics::PerformanceRow;

lazy_static! {
    /// Single-letter M/R token, optionally preceded by a marker segment, then
    /// the category segment.
    static ref CATEGORY_REGEX: Regex =
        Regex::new(r"(?:^|_)(?:[A-Za-z0-9]+_)?[MR]_([^_]+)").expect("Invalid regex pattern");

    /// `-ch<digits>_` marker followed by the domain segment.
    static ref DOMAIN_REGEX: Regex =
        Regex::new(r"-ch\d+_([^_]+)").expect("Invalid regex pattern");
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalAttributes {
    pub style_group: String,
    pub category: String,
    pub domain: String,
}

impl CategoricalAttributes {
    /// Derives all three attributes independently from `entity_name`.
    pub fn from_entity_name(entity_name: &str) -> Self {
        Self {
            style_group: extract_style_group(entity_name),
            category: extract_category(entity_name),
            domain: extract_domain(entity_name),
        }
    }
}

/// A performance row with its classification attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRow {
    #[serde(flatten)]
    pub performance: PerformanceRow,
    pub attributes: CategoricalAttributes,
}

/// Classifies every row, consuming the input table.
pub fn classify_rows(rows: Vec<PerformanceRow>) -> Vec<ClassifiedRow> {
    rows.into_iter()
        .map(|performance| ClassifiedRow {
            attributes: CategoricalAttributes::from_entity_name(&performance.entity_name),
            performance,
        })
        .collect()
}

pub fn extract_style_group(entity_name: &str) -> String {
    entity_name
        .split_once('-')
        .map(|(head, _)| head)
        .unwrap_or(entity_name)
        .to_string()
}

pub fn extract_category(entity_name: &str) -> String {
    capture_or_unknown(&CATEGORY_REGEX, entity_name)
}

pub fn extract_domain(entity_name: &str) -> String {
    capture_or_unknown(&DOMAIN_REGEX, entity_name)
}

fn capture_or_unknown(pattern: &Regex, entity_name: &str) -> String {
    pattern
        .captures(entity_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_ATTRIBUTE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let attrs = CategoricalAttributes::from_entity_name("US-ch4512_Insurance_R_CarQuotes_v2");
        assert_eq!(attrs.style_group, "US");
        assert_eq!(attrs.domain, "Insurance");
        assert_eq!(attrs.category, "CarQuotes");
    }

    #[test]
    fn test_style_group_without_delimiter_is_whole_name() {
        assert_eq!(extract_style_group("PlainName"), "PlainName");
        assert_eq!(extract_style_group("A-B-C"), "A");
        assert_eq!(extract_style_group("-lead"), "");
    }

    #[test]
    fn test_category_with_marker_segment() {
        assert_eq!(extract_category("KW_X1_M_Loans_2024"), "Loans");
        assert_eq!(extract_category("M_Travel"), "Travel");
    }

    #[test]
    fn test_category_requires_single_letter_token() {
        assert_eq!(extract_category("KW_MR_Loans"), UNKNOWN_ATTRIBUTE);
        assert_eq!(extract_category("KW_Mx_Loans"), UNKNOWN_ATTRIBUTE);
        assert_eq!(extract_category("KW_M"), UNKNOWN_ATTRIBUTE);
    }

    #[test]
    fn test_category_is_case_sensitive() {
        assert_eq!(extract_category("KW_m_Loans"), UNKNOWN_ATTRIBUTE);
    }

    #[test]
    fn test_domain_requires_digits() {
        assert_eq!(extract_domain("US-ch_Finance"), UNKNOWN_ATTRIBUTE);
        assert_eq!(extract_domain("US-ch77_Finance"), "Finance");
        assert_eq!(extract_domain("US-ch77_"), UNKNOWN_ATTRIBUTE);
    }

    #[test]
    fn test_unmatched_defaults_to_unknown() {
        let attrs = CategoricalAttributes::from_entity_name("");
        assert_eq!(attrs.style_group, "");
        assert_eq!(attrs.category, UNKNOWN_ATTRIBUTE);
        assert_eq!(attrs.domain, UNKNOWN_ATTRIBUTE);
    }
}
