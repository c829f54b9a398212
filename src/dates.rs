//! Post date parsing and display

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// Whether `s` has the `YYYY-MM-DD` shape, real date or not
pub fn looks_like_date(s: &str) -> bool {
    DATE_PATTERN.is_match(s)
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !looks_like_date(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Long-form display date, e.g. `February 4, 2026`
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a `YYYY-MM-DD` string for display.
///
/// Anything that is not a valid date comes back unchanged, so callers can
/// pass raw frontmatter through without checking it first.
pub fn format_date(s: &str) -> String {
    match parse_date(s.trim()) {
        Some(date) => format_naive_date(date),
        None => s.to_string(),
    }
}
