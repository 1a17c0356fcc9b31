//! Calendar helpers: month keys, month boundaries and day-of-month projection.
//!
//! Everything here works on `NaiveDate` (no time component, no time zone).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// A calendar month, displayed and parsed as `"YYYY-MM"`.
///
/// Both boundaries are resolved at construction, so a `MonthKey` that exists
/// always has a valid first and last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    start: NaiveDate,
    end: NaiveDate,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidMonthKey(format!("{year:04}-{month:02}"));
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end = NaiveDate::from_ymd_opt(year, month, last_day_of_month(year, month))
            .ok_or_else(invalid)?;
        Ok(Self { start, end })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        let end_day = last_day_of_month(date.year(), date.month());
        Self {
            start: date.with_day(1).unwrap_or(date),
            end: date.with_day(end_day).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// First day of the month.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the month.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn days(&self) -> u32 {
        self.end.day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Accepts `"YYYY-MM"` or any longer ISO date string (only the first seven
/// characters are read, so `"2024-02-17"` parses as February 2024).
impl FromStr for MonthKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidMonthKey(s.to_string());
        let key = s.trim().get(..7).ok_or_else(invalid)?;
        let (year, month) = key.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Month key of a date (`"YYYY-MM"`).
pub fn month_key(date: NaiveDate) -> MonthKey {
    MonthKey::from_date(date)
}

/// First and last calendar day of the month, inclusive.
pub fn month_bounds(key: MonthKey) -> (NaiveDate, NaiveDate) {
    (key.start(), key.end())
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`.
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// `min(day, last day of the month)`, so a due day of 31 lands on the 30th
/// in April and on the 28th/29th in February.
pub fn clamp_day_of_month(year: i32, month: u32, day: u32) -> u32 {
    day.clamp(1, last_day_of_month(year, month))
}

/// Next billing occurrence of `day` on or after `reference`.
///
/// Stays in the reference month while its day-of-month has not passed `day`;
/// otherwise rolls into the following month (December wraps to January of the
/// next year). The day is clamped to the target month's length either way.
pub fn next_occurrence(day: u32, reference: NaiveDate) -> Result<NaiveDate, CoreError> {
    let day = day.clamp(1, 31);
    let (mut year, mut month) = (reference.year(), reference.month());
    if reference.day() > day {
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    NaiveDate::from_ymd_opt(year, month, clamp_day_of_month(year, month, day))
        .ok_or_else(|| CoreError::DateOutOfRange(format!("day {day} after {reference}")))
}

/// Every calendar day of the month, in order.
pub fn days_of_month(key: MonthKey) -> impl Iterator<Item = NaiveDate> {
    let end = key.end();
    key.start().iter_days().take_while(move |d| *d <= end)
}
