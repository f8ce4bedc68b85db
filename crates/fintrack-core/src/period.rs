//! Calendar-month reporting periods

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{Error, Result};

/// A calendar month, used to bucket transactions for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    /// Always the first day of the month
    start: NaiveDate,
}

impl Period {
    /// Create a period for the given year and month (1-12)
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidData(format!("Invalid period: {}-{}", year, month)))?;
        Ok(Self { start })
    }

    /// The month a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start
    }

    pub fn last_day(&self) -> NaiveDate {
        self.start + Duration::days(i64::from(self.days_in_month()) - 1)
    }

    /// Calendar length of the month (leap-year aware)
    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if self.start.leap_year() => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// The immediately preceding month; January rolls back to December of the prior year
    pub fn previous(&self) -> Self {
        Self::containing(self.start - Duration::days(1))
    }

    /// Inclusive date bounds
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day(), self.last_day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
