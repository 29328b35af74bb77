use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::CalendarError;

const KEY_FORMAT: &str = "%Y-%m-%d";

static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("date key pattern is valid")
});

/// Format a date as its `YYYY-MM-DD` key
pub fn to_key(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` key into a calendar date.
///
/// Only the exact zero-padded shape is accepted, and the date must exist
/// (no month 13, no February 30).
pub fn parse_key(value: &str) -> Result<NaiveDate, CalendarError> {
    let captures = KEY_PATTERN
        .captures(value)
        .ok_or_else(|| CalendarError::malformed(value))?;

    let year: i32 = parse_component(value, &captures[1])?;
    let month: u32 = parse_component(value, &captures[2])?;
    let day: u32 = parse_component(value, &captures[3])?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| CalendarError::malformed(value))
}

fn parse_component<T: std::str::FromStr>(value: &str, digits: &str) -> Result<T, CalendarError> {
    digits.parse().map_err(|_| CalendarError::malformed(value))
}

/// Day of week with 0 = Sunday through 6 = Saturday
pub fn weekday_of(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Move a date by `n` days (negative moves backwards).
///
/// Returns `None` only when the result leaves chrono's representable range.
pub fn add_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    let days = Days::new(n.unsigned_abs());
    if n >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}

/// Inclusive `[start, end]` range of calendar dates.
///
/// A window whose start lies after its end is empty; it is a valid value and
/// simply contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window bounded below only; the upper end is the last representable date
    pub fn open_ended(start: NaiveDate) -> Self {
        Self::new(start, NaiveDate::MAX)
    }

    /// Window covering a single day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Parse a window from two date keys
    pub fn parse(start: &str, end: &str) -> Result<Self, CalendarError> {
        Ok(Self::new(parse_key(start)?, parse_key(end)?))
    }

    /// Intersection of two windows: latest start, earliest end
    pub fn clamp(a: DateWindow, b: DateWindow) -> DateWindow {
        DateWindow::new(a.start.max(b.start), a.end.min(b.end))
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
