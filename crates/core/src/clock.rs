//! Weekday normalization and minute-of-day arithmetic.
//!
//! Weekdays are ISO-normalized: Monday = 0 .. Sunday = 6. All window
//! comparisons operate purely on minute-of-day; there is deliberately no
//! calendar-day disambiguation (tokens expire at the end of their
//! occurrence's date, which bounds the midnight wrap).

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// How many minutes after the scheduled time a join is still accepted.
pub const JOIN_PAST_TOLERANCE_MINS: i32 = 50;

/// How many minutes before the scheduled time a join is already accepted.
pub const JOIN_FUTURE_TOLERANCE_MINS: i32 = 10;

/// ISO weekday index for a date: Monday = 0 .. Sunday = 6.
pub fn iso_weekday(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_monday() as i16
}

/// Minutes since midnight for a clock time. Seconds are discarded.
pub fn minute_of_day(time: NaiveTime) -> i32 {
    (time.hour() * 60 + time.minute()) as i32
}

/// Whether `now` falls inside the join window around `scheduled`.
///
/// Rejects when the class started more than `past_tolerance_mins` ago, or
/// starts more than `future_tolerance_mins` from now. Both comparisons are
/// minute-of-day only.
pub fn within_window(
    scheduled: NaiveTime,
    now: NaiveTime,
    past_tolerance_mins: i32,
    future_tolerance_mins: i32,
) -> bool {
    let scheduled = minute_of_day(scheduled);
    let now = minute_of_day(now);
    if now - scheduled > past_tolerance_mins {
        return false; // too late
    }
    if scheduled - now > future_tolerance_mins {
        return false; // too early
    }
    true
}
