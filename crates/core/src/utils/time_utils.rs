use chrono::{Local, NaiveDate};

/// Date formats accepted for the `Date` column, tried in order.
/// ISO first; the others are what spreadsheet exports commonly produce.
const ACCEPTED_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parses a date cell, returning `None` when no accepted format matches.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    // Timestamps exported as "2024-01-02 00:00:00" keep only the date part
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Returns the date `days` calendar days before `date`, if representable.
pub fn days_before(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_sub_days(chrono::Days::new(days))
}

/// The default report date: yesterday in local time.
pub fn default_report_date() -> NaiveDate {
    let today = Local::now().date_naive();
    days_before(today, 1).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_report_date_formats() {
        assert_eq!(parse_report_date("2024-01-02"), Some(date("2024-01-02")));
        assert_eq!(parse_report_date(" 01/02/2024 "), Some(date("2024-01-02")));
        assert_eq!(parse_report_date("2024/01/02"), Some(date("2024-01-02")));
        assert_eq!(
            parse_report_date("2024-01-02 00:00:00"),
            Some(date("2024-01-02"))
        );
        assert_eq!(parse_report_date("yesterday"), None);
        assert_eq!(parse_report_date(""), None);
    }

    #[test]
    fn test_days_before_crosses_month() {
        assert_eq!(days_before(date("2024-03-01"), 1), Some(date("2024-02-29")));
        assert_eq!(days_before(date("2024-03-01"), 2), Some(date("2024-02-28")));
    }
}
