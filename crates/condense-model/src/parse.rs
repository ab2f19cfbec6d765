//! Lenient string parsing for date-like values

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Try the supported date formats in order
pub fn parse_naive_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Try the supported datetime formats in order
pub fn parse_naive_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_naive_date("2024-03-15").is_some());
        assert!(parse_naive_date("15/03/2024").is_some());
        assert!(parse_naive_date("not a date").is_none());
        assert!(parse_naive_date("2024-13-40").is_none());
    }

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_naive_datetime("2024-03-15 08:30:00").is_some());
        assert!(parse_naive_datetime("2024-03-15T08:30").is_some());
        assert!(parse_naive_datetime("2024-03-15").is_none());
    }
}
