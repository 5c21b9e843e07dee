//! Calendar month and date range helpers.
//!
//! Payroll runs and ledger summaries are both windowed by calendar
//! periods. This module contains the [`DateRange`] type (a half-open
//! `[start, end)` window) and the month arithmetic shared by both engines.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Normalizes a date to the first day of its calendar month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::first_of_month;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
/// assert_eq!(first_of_month(date), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// ```
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the first day of the month following `date`'s month.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let start = first_of_month(date);
    start
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX)
}

/// Returns the first day of the month `count` months before `date`'s month.
pub fn months_before(date: NaiveDate, count: u32) -> NaiveDate {
    let start = first_of_month(date);
    start
        .checked_sub_months(Months::new(count))
        .unwrap_or(NaiveDate::MIN)
}

/// Number of calendar days in `date`'s month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::days_in_month;
/// use chrono::NaiveDate;
///
/// assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()), 29);
/// assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()), 30);
/// ```
pub fn days_in_month(date: NaiveDate) -> u32 {
    let start = first_of_month(date);
    next_month(start).signed_duration_since(start).num_days() as u32
}

/// A half-open window of time, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first instant inside the window.
    pub start: NaiveDateTime,
    /// The first instant after the window.
    pub end: NaiveDateTime,
}

impl DateRange {
    /// The window covering one calendar day.
    pub fn for_day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::default());
        let end = date
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::default()))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    /// The window covering the calendar month containing `date`.
    pub fn for_month(date: NaiveDate) -> Self {
        Self {
            start: first_of_month(date).and_time(NaiveTime::default()),
            end: next_month(date).and_time(NaiveTime::default()),
        }
    }

    /// The window from the start of the month `months_back - 1` months before
    /// `date` through the end of `date`'s month.
    pub fn trailing_months(date: NaiveDate, months_back: u32) -> Self {
        let first = months_before(date, months_back.saturating_sub(1));
        Self {
            start: first.and_time(NaiveTime::default()),
            end: next_month(date).and_time(NaiveTime::default()),
        }
    }

    /// Checks whether an instant falls inside the window.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let march = DateRange::for_month(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    /// let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let april = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// assert!(march.contains(first));
    /// assert!(!march.contains(april));
    /// ```
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Checks whether a calendar date's midnight falls inside the window.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.and_time(NaiveTime::default()))
    }
}
