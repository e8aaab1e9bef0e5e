//! Attendance-status derivation.
//!
//! Each occurrence resolves to exactly one status with a fixed priority:
//! CANCELLED beats everything, then LATE, then ON_TIME, then MISSED.
//! Lateness compares joining time against scheduled time on minute-of-day
//! (a shared synthetic day), so no date arithmetic is involved.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::clock::minute_of_day;

/// Minutes after the scheduled start before a join counts as late.
pub const LATE_TOLERANCE_MINS: i32 = 10;

/// Derived per-occurrence attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Cancelled,
    Late,
    OnTime,
    Missed,
}

/// Derive the status for one occurrence.
///
/// A cancellation is terminal regardless of any join record. A join is
/// late when it lands strictly more than `late_tolerance_mins` after the
/// scheduled time.
pub fn derive_status(
    cancelled: bool,
    joining_time: Option<NaiveTime>,
    scheduled_time: NaiveTime,
    late_tolerance_mins: i32,
) -> AttendanceStatus {
    if cancelled {
        return AttendanceStatus::Cancelled;
    }
    match joining_time {
        Some(joined) => {
            let delay = minute_of_day(joined) - minute_of_day(scheduled_time);
            if delay > late_tolerance_mins {
                AttendanceStatus::Late
            } else {
                AttendanceStatus::OnTime
            }
        }
        None => AttendanceStatus::Missed,
    }
}

/// Human-facing report date, e.g. `03 September 2026`.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn cancelled_overrides_join_record() {
        let status = derive_status(true, Some(t(14, 0)), t(14, 0), LATE_TOLERANCE_MINS);
        assert_eq!(status, AttendanceStatus::Cancelled);
    }

    #[test]
    fn missed_when_never_joined() {
        let status = derive_status(false, None, t(14, 0), LATE_TOLERANCE_MINS);
        assert_eq!(status, AttendanceStatus::Missed);
    }

    #[test]
    fn on_time_within_tolerance() {
        let status = derive_status(false, Some(t(14, 5)), t(14, 0), LATE_TOLERANCE_MINS);
        assert_eq!(status, AttendanceStatus::OnTime);
    }

    #[test]
    fn on_time_exactly_on_tolerance_boundary() {
        let status = derive_status(false, Some(t(14, 10)), t(14, 0), LATE_TOLERANCE_MINS);
        assert_eq!(status, AttendanceStatus::OnTime);
    }

    #[test]
    fn late_past_tolerance() {
        let status = derive_status(false, Some(t(14, 11)), t(14, 0), LATE_TOLERANCE_MINS);
        assert_eq!(status, AttendanceStatus::Late);
    }

    #[test]
    fn early_join_is_on_time() {
        let status = derive_status(false, Some(t(13, 55)), t(14, 0), LATE_TOLERANCE_MINS);
        assert_eq!(status, AttendanceStatus::OnTime);
    }

    #[test]
    fn formats_report_date_with_padded_day() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
        assert_eq!(format_report_date(date), "03 September 2026");
    }
}
