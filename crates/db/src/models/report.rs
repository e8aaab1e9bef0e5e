use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use eduportal_core::types::DbId;

/// Raw reporting row: one occurrence joined with its optional cancellation
/// and joining records plus display labels. Status derivation happens in
/// `eduportal_core::attendance`.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRow {
    pub occurrence_id: DbId,
    pub class_date: NaiveDate,
    pub class_time: NaiveTime,
    pub joined_time: Option<NaiveTime>,
    pub cancelled: bool,
    pub class_name: String,
    pub teacher: String,
    pub classroom: String,
}

/// Human-facing report row returned by the reports endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    pub status: eduportal_core::attendance::AttendanceStatus,
    pub class_name: String,
    /// Formatted `DD MonthName YYYY`.
    pub date: String,
    pub time: NaiveTime,
    pub teacher: String,
    pub classroom: String,
    pub subject: String,
}
