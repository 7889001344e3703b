//! Display formatting shared by the record views.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Render a backend date as `Jan 5, 2024`.
///
/// Empty or missing values render as `-`. Values that are neither a calendar
/// date nor an RFC 3339 timestamp are shown unchanged. Timestamps are shown in
/// UTC.
#[must_use]
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return "-".to_owned();
    };

    let medium = format_description!("[month repr:short] [day padding:none], [year]");
    parse_date(raw)
        .and_then(|date| date.format(&medium).ok())
        .unwrap_or_else(|| raw.to_owned())
}

fn parse_date(raw: &str) -> Option<Date> {
    if let Ok(timestamp) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(timestamp.to_offset(time::UtcOffset::UTC).date());
    }
    let calendar = format_description!("[year]-[month]-[day]");
    match raw.split_once(['T', ' ']) {
        Some((day, _)) => Date::parse(day, &calendar).ok(),
        None => Date::parse(raw, &calendar).ok(),
    }
}
