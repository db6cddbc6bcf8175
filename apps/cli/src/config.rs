use std::path::PathBuf;

use adsync_core::metrics::{parse_decimal, parse_ratio, ReportScope};
use adsync_core::report::RowFilter;
use adsync_core::utils::time_utils::{default_report_date, parse_report_date};
use adsync_core::ReconcileSettings;
use adsync_platform::DEFAULT_API_VERSION;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_PLATFORM_URL: &str = "https://graph.facebook.com";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// What to do with the pending changes once the report is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    None,
    Batch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformConfig {
    pub base_url: String,
    pub api_version: String,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub performance_csv: PathBuf,
    pub desired_state_csv: PathBuf,
    pub scope: ReportScope,
    pub filter: RowFilter,
    pub apply: ApplyMode,
    pub output: OutputFormat,
    /// `None` writes through the dry-run writer.
    pub platform: Option<PlatformConfig>,
    pub settings: ReconcileSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let performance_csv = get("ADSYNC_PERFORMANCE_CSV")
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("ADSYNC_PERFORMANCE_CSV"))?;
        let desired_state_csv = get("ADSYNC_DESIRED_STATE_CSV")
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("ADSYNC_DESIRED_STATE_CSV"))?;

        let scope = match (get("ADSYNC_RANGE_START"), get("ADSYNC_RANGE_END")) {
            (Some(start), Some(end)) => ReportScope::range(
                date_value("ADSYNC_RANGE_START", &start)?,
                date_value("ADSYNC_RANGE_END", &end)?,
            ),
            (Some(_), None) => return Err(ConfigError::Missing("ADSYNC_RANGE_END")),
            (None, Some(_)) => return Err(ConfigError::Missing("ADSYNC_RANGE_START")),
            (None, None) => match get("ADSYNC_DATE") {
                Some(raw) => ReportScope::day(date_value("ADSYNC_DATE", &raw)?),
                None => ReportScope::day(default_report_date()),
            },
        };

        let min_roas = get("ADSYNC_MIN_ROAS")
            .map(|raw| ratio_value("ADSYNC_MIN_ROAS", &raw))
            .transpose()?;
        let filter = RowFilter {
            account_id: get("ADSYNC_ACCOUNT"),
            style_group: get("ADSYNC_STYLE_GROUP"),
            category: get("ADSYNC_CATEGORY"),
            domain: get("ADSYNC_DOMAIN"),
            min_roas,
        };

        let apply = match get("ADSYNC_APPLY").as_deref() {
            None => ApplyMode::None,
            Some(v) if v.eq_ignore_ascii_case("none") => ApplyMode::None,
            Some(v) if v.eq_ignore_ascii_case("batch") => ApplyMode::Batch,
            Some(v) => {
                return Err(ConfigError::Invalid {
                    key: "ADSYNC_APPLY",
                    value: v.to_string(),
                })
            }
        };

        let output = match get("ADSYNC_OUTPUT").as_deref() {
            None => OutputFormat::Json,
            Some(v) if v.eq_ignore_ascii_case("json") => OutputFormat::Json,
            Some(v) if v.eq_ignore_ascii_case("table") => OutputFormat::Table,
            Some(v) => {
                return Err(ConfigError::Invalid {
                    key: "ADSYNC_OUTPUT",
                    value: v.to_string(),
                })
            }
        };

        let platform = get("ADSYNC_PLATFORM_TOKEN").map(|access_token| PlatformConfig {
            base_url: get("ADSYNC_PLATFORM_URL")
                .unwrap_or_else(|| DEFAULT_PLATFORM_URL.to_string()),
            api_version: get("ADSYNC_PLATFORM_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            access_token,
        });

        let settings = match get("ADSYNC_BUDGET_TOLERANCE") {
            Some(raw) => {
                let tolerance = parse_decimal(&raw).ok_or_else(|| ConfigError::Invalid {
                    key: "ADSYNC_BUDGET_TOLERANCE",
                    value: raw.clone(),
                })?;
                ReconcileSettings::default()
                    .with_budget_tolerance(tolerance)
                    .map_err(|_| ConfigError::Invalid {
                        key: "ADSYNC_BUDGET_TOLERANCE",
                        value: raw,
                    })?
            }
            None => ReconcileSettings::default(),
        };

        Ok(Config {
            performance_csv,
            desired_state_csv,
            scope,
            filter,
            apply,
            output,
            platform,
            settings,
        })
    }
}

fn date_value(key: &'static str, raw: &str) -> Result<NaiveDate, ConfigError> {
    parse_report_date(raw).ok_or_else(|| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

/// `"120%"` and `"1.2"` both mean a ratio of 1.2.
fn ratio_value(key: &'static str, raw: &str) -> Result<Decimal, ConfigError> {
    parse_ratio(raw).ok_or_else(|| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
