//! Tunables for change detection and platform writes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{BUDGET_CHANGE_TOLERANCE, MINOR_UNITS_PER_MAJOR};
use crate::errors::{Error, Result};

/// Explicit configuration handed to the reconciliation entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileSettings {
    /// Minimum |proposed - current| for a budget proposal to count as a change.
    pub budget_tolerance: Decimal,
    /// Billing-currency to platform minor-unit factor.
    pub minor_units_per_major: i64,
}

impl ReconcileSettings {
    pub fn with_budget_tolerance(mut self, tolerance: Decimal) -> Result<Self> {
        if tolerance.is_sign_negative() {
            return Err(Error::InvalidConfigValue(format!(
                "budget tolerance must not be negative, got {}",
                tolerance
            )));
        }
        self.budget_tolerance = tolerance;
        Ok(self)
    }

    pub fn minor_unit_factor(&self) -> Decimal {
        Decimal::from(self.minor_units_per_major)
    }
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            budget_tolerance: BUDGET_CHANGE_TOLERANCE,
            minor_units_per_major: MINOR_UNITS_PER_MAJOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_tolerance_is_half_unit() {
        let settings = ReconcileSettings::default();
        assert_eq!(settings.budget_tolerance, dec!(0.5));
        assert_eq!(settings.budget_tolerance, BUDGET_CHANGE_TOLERANCE);
        assert_eq!(settings.minor_unit_factor(), dec!(100));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let result = ReconcileSettings::default().with_budget_tolerance(dec!(-1));
        assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
    }
}
