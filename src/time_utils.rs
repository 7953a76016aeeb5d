// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for dates and timestamps.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

/// Current calendar year in local time.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Extract the year from a loosely formatted birth date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times and a bare `YYYY`.
pub fn parse_birth_year(input: &str) -> Option<i32> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date.year());
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(input) {
        return Some(date_time.year());
    }
    if input.len() == 4 {
        return input.parse().ok();
    }
    None
}
