//! # Date-Range Planner
//!
//! Pure calendar arithmetic: expands a closed `[start, end]` range into every day it
//! covers, and derives the default ranges used by the scheduled and interactive
//! triggers. An inverted range is an empty plan, never an error.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::combo::DEFAULT_WINDOW_DAYS;
use crate::error::{AdminError, AdminResult};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar day
pub fn parse_day(input: &str) -> AdminResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DAY_FORMAT)
        .map_err(|e| AdminError::invalid_date(input, e))
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Every day from `start` to `end` inclusive, as `YYYY-MM-DD` strings
///
/// Malformed input fails with `AdminError::InvalidDate`; `end < start` yields an
/// empty list.
pub fn dates_between(start: &str, end: &str) -> AdminResult<Vec<String>> {
    let range = DateRange::parse(start, end)?;
    Ok(range.days().into_iter().map(format_day).collect())
}

/// Today when today is a Saturday, otherwise the next Saturday
pub fn upcoming_saturday(today: NaiveDate) -> NaiveDate {
    let weekday = u64::from(today.weekday().num_days_from_sunday());
    let offset = (6 + 7 - weekday) % 7;
    today + Days::new(offset)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn parse(start: &str, end: &str) -> AdminResult<Self> {
        Ok(Self::new(parse_day(start)?, parse_day(end)?))
    }

    /// Range for unattended scheduled runs: today through the upcoming Saturday
    pub fn next_week(today: NaiveDate) -> Self {
        Self::new(today, upcoming_saturday(today))
    }

    /// Default interactive task range: today through the last day of this month
    pub fn rest_of_month(today: NaiveDate) -> Self {
        let end = today
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .and_then(|next_first| next_first.pred_opt())
            .unwrap_or(today);
        Self::new(today, end)
    }

    /// Default interactive combo range
    ///
    /// Starts the day after the latest existing combo (or today when there is
    /// none) and spans a further fifteen days.
    pub fn combo_window(today: NaiveDate, latest_existing: Option<NaiveDate>) -> Self {
        let start = latest_existing
            .and_then(|latest| latest.succ_opt())
            .unwrap_or(today);
        let end = start
            .checked_add_days(Days::new(DEFAULT_WINDOW_DAYS as u64))
            .unwrap_or(start);
        Self::new(start, end)
    }

    /// Ordered days of the range, both endpoints included
    pub fn days(&self) -> Vec<NaiveDate> {
        if self.end_date < self.start_date {
            return Vec::new();
        }
        self.start_date
            .iter_days()
            .take_while(|day| *day <= self.end_date)
            .collect()
    }

    pub fn len(&self) -> usize {
        if self.end_date < self.start_date {
            0
        } else {
            (self.end_date - self.start_date).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            format_day(self.start_date),
            format_day(self.end_date)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dates_between_inclusive() {
        let dates = dates_between("2024-06-01", "2024-06-03").unwrap();
        assert_eq!(dates, vec!["2024-06-01", "2024-06-02", "2024-06-03"]);
    }

    #[test]
    fn test_single_day_range() {
        assert_eq!(
            dates_between("2024-06-01", "2024-06-01").unwrap(),
            vec!["2024-06-01"]
        );
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert!(dates_between("2024-06-03", "2024-06-01").unwrap().is_empty());
        let range = DateRange::new(day(2024, 6, 3), day(2024, 6, 1));
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
    }

    #[test]
    fn test_crosses_month_year_and_leap_day() {
        let dates = dates_between("2023-12-30", "2024-01-02").unwrap();
        assert_eq!(
            dates,
            vec!["2023-12-30", "2023-12-31", "2024-01-01", "2024-01-02"]
        );

        let dates = dates_between("2024-02-28", "2024-03-01").unwrap();
        assert_eq!(dates, vec!["2024-02-28", "2024-02-29", "2024-03-01"]);

        let dates = dates_between("2023-02-28", "2023-03-01").unwrap();
        assert_eq!(dates, vec!["2023-02-28", "2023-03-01"]);
    }

    #[test]
    fn test_malformed_dates_propagate() {
        assert!(matches!(
            dates_between("2024-13-01", "2024-06-01"),
            Err(AdminError::InvalidDate { .. })
        ));
        assert!(matches!(
            dates_between("2024-06-01", "tomorrow"),
            Err(AdminError::InvalidDate { .. })
        ));
        assert!(dates_between("2023-02-29", "2023-03-01").is_err());
    }

    #[test]
    fn test_next_week_on_saturday_is_single_day() {
        let saturday = day(2024, 6, 1);
        assert_eq!(saturday.weekday(), Weekday::Sat);
        let range = DateRange::next_week(saturday);
        assert_eq!(range.start_date, saturday);
        assert_eq!(range.end_date, saturday);
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_next_week_from_sunday_and_friday() {
        let sunday = day(2024, 6, 2);
        let range = DateRange::next_week(sunday);
        assert_eq!(range.end_date, day(2024, 6, 8));
        assert_eq!((range.end_date - range.start_date).num_days(), 6);

        let friday = day(2024, 6, 7);
        let range = DateRange::next_week(friday);
        assert_eq!(range.end_date, day(2024, 6, 8));
        assert_eq!((range.end_date - range.start_date).num_days(), 1);
    }

    #[test]
    fn test_rest_of_month() {
        assert_eq!(
            DateRange::rest_of_month(day(2024, 2, 10)).end_date,
            day(2024, 2, 29)
        );
        assert_eq!(
            DateRange::rest_of_month(day(2024, 12, 31)).end_date,
            day(2024, 12, 31)
        );
    }

    #[test]
    fn test_combo_window() {
        let today = day(2024, 6, 1);
        let fresh = DateRange::combo_window(today, None);
        assert_eq!(fresh.start_date, today);
        assert_eq!(fresh.end_date, day(2024, 6, 16));

        let continued = DateRange::combo_window(today, Some(day(2024, 6, 20)));
        assert_eq!(continued.start_date, day(2024, 6, 21));
        assert_eq!(continued.end_date, day(2024, 7, 6));
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(day(2024, 6, 1), day(2024, 6, 3));
        assert_eq!(range.to_string(), "2024-06-01..2024-06-03");
    }
}
