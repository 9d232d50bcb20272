//! Plain-text rendering for the terminal client.
//!
//! Every function returns a `String` so views can be checked without a TTY.

pub mod chat;
pub mod exercise;
pub mod pages;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses the timestamp shapes the backend emits: RFC 3339, naive ISO
/// datetimes, and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// "Fri, Jan 16"; unparseable input is shown as-is.
pub fn format_day(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%a, %b %-d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// "10:30 AM"; unparseable input is shown as-is.
pub fn format_time(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
