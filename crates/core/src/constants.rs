use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Sentinel used when a categorical attribute cannot be derived from a name.
pub const UNKNOWN_ATTRIBUTE: &str = "UNKNOWN";

/// Minimum absolute difference between a proposed and a live budget for the
/// proposal to count as a change.
pub const BUDGET_CHANGE_TOLERANCE: Decimal = dec!(0.5);

/// Factor converting billing-currency amounts into platform minor units.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Decimal precision for derived ratios
pub const RATIO_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Placeholder rendered for values that are absent or not applicable.
pub const ABSENT_DISPLAY: &str = "—";

/// Performance collection name and its producer contract headers.
pub const PERFORMANCE_COLLECTION: &str = "performance";
pub const COL_DATE: &str = "Date";
pub const COL_AD_NAME: &str = "Ad Name";
pub const COL_CHANNEL_ID: &str = "Custom Channel ID";
pub const COL_STYLE_ID: &str = "Search Style ID";
pub const COL_SPEND: &str = "Spend (USD)";
pub const COL_REVENUE: &str = "Revenue (USD)";
pub const COL_ACCOUNT_ID: &str = "Account ID";

/// Desired-state collection name and its headers.
pub const DESIRED_STATE_COLLECTION: &str = "desired_state";
pub const COL_AD_SET_ID: &str = "Ad Set ID";
pub const COL_AD_STATUS: &str = "Ad Status";
pub const COL_CURRENT_STATUS: &str = "Current Status";
pub const COL_CURRENT_BUDGET: &str = "Current Budget";
pub const COL_NEW_BUDGET: &str = "New Budget";
pub const COL_NEW_STATUS: &str = "New Status";
