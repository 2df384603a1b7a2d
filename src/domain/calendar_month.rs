use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// The month a calendar view is anchored to. Months render
/// independently; a view never spans two of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::new(format!(
                "Invalid month number: {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Parses the `yyyy-MM` form the wire uses, e.g. `2024-01`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let (year, month) = value.split_once('-').ok_or_else(|| {
            ValidationError::new(format!("Invalid month {value:?}"))
        })?;
        let year = year.parse::<i32>().map_err(|e| {
            ValidationError::new(format!("Invalid month {value:?}: {e}"))
        })?;
        let month = month.parse::<u32>().map_err(|e| {
            ValidationError::new(format!("Invalid month {value:?}: {e}"))
        })?;
        Self::new(year, month)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("First of a validated month is always a date")
    }

    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("First of a validated month is always a date")
            .pred_opt()
            .expect("Last day of a month is always a date")
    }

    pub fn day_count(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The calendar date a day-of-month falls on, if the month has one.
    pub fn day(&self, day_of_month: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day_of_month)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
