use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use eduportal_core::types::{DbId, Timestamp};

/// A row from the `timetable_entries` table.
///
/// Exactly one of `weekday` (ISO, Monday = 0) and `class_date` is set;
/// the table CHECK enforces it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableEntry {
    pub id: DbId,
    pub class_name: String,
    pub time_of_day: NaiveTime,
    pub classroom_id: DbId,
    pub teacher_id: DbId,
    pub active: bool,
    pub weekday: Option<i16>,
    pub class_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Role-scoped timetable listing row, joined with display names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableViewRow {
    pub class_type: String,
    pub classroom_id: DbId,
    pub weekday: Option<i16>,
    pub class_date: Option<NaiveDate>,
    pub time_of_day: NaiveTime,
    pub teacher: String,
    pub subject: String,
}
