use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use eduportal_core::types::{DbId, Timestamp};

/// A row from the `class_occurrences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassOccurrence {
    pub id: DbId,
    pub timetable_id: DbId,
    pub classroom_id: DbId,
    pub class_date: NaiveDate,
    pub class_time: NaiveTime,
    pub teacher_id: DbId,
    pub sponsor_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One of today's sessions as listed for the acting user, before a
/// capability token is minted for it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TodaySessionRow {
    pub occurrence_id: DbId,
    pub timetable_id: DbId,
    pub classroom_id: DbId,
    pub class_date: NaiveDate,
    pub class_time: NaiveTime,
    pub subject: String,
    pub classroom_name: String,
    pub join_link: String,
    pub cancelled: bool,
}
