use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::CellValue;

// Year-month only ("2024-03"); chrono cannot parse a date without a day.
static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid year-month pattern"));

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parses a cell as a finite number.
///
/// Numbers pass through when finite. Text is trimmed and read as a decimal
/// float literal; blank text and `inf`/`NaN` spellings are rejected.
pub fn parse_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Number(_) | CellValue::Empty => None,
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
    }
}

/// Locale-independent calendar/time check.
pub fn is_date_string(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }

    if DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok() {
        return true;
    }

    if DATETIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(s, format).is_ok())
    {
        return true;
    }

    if DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(s, format).is_ok())
    {
        return true;
    }

    YEAR_MONTH.is_match(s)
}

pub fn is_date_value(value: &CellValue) -> bool {
    match value {
        CellValue::Text(s) => is_date_string(s),
        CellValue::Number(_) | CellValue::Empty => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_from_text() {
        assert_eq!(parse_number(&"5".into()), Some(5.0));
        assert_eq!(parse_number(&"  -2.5e1 ".into()), Some(-25.0));
        assert_eq!(parse_number(&CellValue::Number(3.0)), Some(3.0));
        assert_eq!(parse_number(&"apple".into()), None);
        assert_eq!(parse_number(&"".into()), None);
        assert_eq!(parse_number(&"   ".into()), None);
        assert_eq!(parse_number(&"NaN".into()), None);
        assert_eq!(parse_number(&"inf".into()), None);
        assert_eq!(parse_number(&CellValue::Number(f64::NAN)), None);
        assert_eq!(parse_number(&CellValue::Empty), None);
    }

    #[test]
    fn recognizes_common_date_shapes() {
        for s in [
            "2024-01-01",
            "2024-01-01T10:30:00Z",
            "2024-01-01T10:30:00.250",
            "2024-01-01 10:30",
            "2024/03/15",
            "03/15/2024",
            "March 15, 2024",
            "15 Mar 2024",
            "Tue, 1 Jul 2003 10:52:37 +0200",
            "2024-03",
        ] {
            assert!(is_date_string(s), "{s} should be a date");
        }
    }

    #[test]
    fn rejects_non_dates() {
        for s in ["apple", "", "2024-13", "32/01/2024", "North"] {
            assert!(!is_date_string(s), "{s} should not be a date");
        }
        assert!(!is_date_value(&CellValue::Number(2024.0)));
    }
}
