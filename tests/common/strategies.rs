//! Proptest strategies for calendar values.

use chrono::NaiveDate;
use proptest::prelude::*;

/// Any day between 1990-01-01 and 2099-12-31
pub fn calendar_day_strategy() -> impl Strategy<Value = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid lower bound");
    (0u64..40_000).prop_map(move |offset| first + chrono::Days::new(offset))
}

/// A start day and a span (in days) that may be negative
pub fn range_strategy() -> impl Strategy<Value = (NaiveDate, i64)> {
    (calendar_day_strategy(), -30i64..400)
}
