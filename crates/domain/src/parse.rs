// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lenient parsing of the string-encoded schedule fields.
//!
//! The upstream feed delivers weekdays, durations, and timestamps as loose
//! strings. Malformed values are recovered as `None` rather than surfaced
//! as errors: a sailing with a bad field still participates in grouping,
//! it just contributes nothing to the affected aggregate.

use chrono::{NaiveDate, NaiveDateTime};

/// Estimated-departure format with a time component.
const ETD_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Estimated-departure format without a time component.
const ETD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a string-encoded departure weekday.
///
/// Accepts only unsigned integer strings; anything else is `None`.
#[must_use]
pub fn parse_weekday(raw: Option<&str>) -> Option<u8> {
    raw.and_then(|value| value.trim().parse::<u8>().ok())
}

/// Parses a string-encoded transit duration in days.
///
/// Accepts only unsigned integer strings, so negative and fractional
/// durations are rejected along with free text.
#[must_use]
pub fn parse_duration_days(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
}

/// Parses an estimated-departure string into a date.
///
/// Supports both the date-time (`2025-05-14 10:30:00`) and date-only
/// (`2025-05-14`) forms seen in the feed. Values containing a space are
/// parsed with the date-time format only; they do not fall back to the
/// date-only form.
#[must_use]
pub fn parse_etd_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains(' ') {
        NaiveDateTime::parse_from_str(trimmed, ETD_DATETIME_FORMAT)
            .ok()
            .map(|dt| dt.date())
    } else {
        NaiveDate::parse_from_str(trimmed, ETD_DATE_FORMAT).ok()
    }
}
