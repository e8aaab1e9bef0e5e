//! Schedule-request validation.
//!
//! Rules run in a fixed order and short-circuit on the first failure, so
//! callers always get exactly one distinct message per bad request.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Longest allowed class name.
pub const MAX_CLASS_NAME_LEN: usize = 27;

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)(:[0-5]\d)?$").unwrap());

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Raw scheduling input as received from the API layer.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    pub class_name: String,
    /// 24-hour clock time, `HH:MM` or `HH:MM:SS`.
    pub time: String,
    /// ISO weekday, Monday = 0 .. Sunday = 6. Mutually exclusive with `date`.
    pub weekday: Option<i16>,
    /// Calendar date, `YYYY-MM-DD`. Mutually exclusive with `weekday`.
    pub date: Option<String>,
    pub teacher_id: DbId,
    pub classroom_id: DbId,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Exactly one of a recurring weekday or a one-off date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSlot {
    Weekday(i16),
    Date(NaiveDate),
}

/// A validated, normalized scheduling request.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub class_name: String,
    pub time: NaiveTime,
    pub slot: SessionSlot,
    pub teacher_id: DbId,
    pub classroom_id: DbId,
    pub active: bool,
}

/// Validate a raw request, in order, stopping at the first failure.
pub fn validate(req: &ScheduleRequest) -> Result<NewSession, CoreError> {
    let class_name = req.class_name.trim();
    if class_name.is_empty() {
        return Err(CoreError::Validation("Class name is missing".into()));
    }
    if class_name.len() > MAX_CLASS_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Class name is longer than {MAX_CLASS_NAME_LEN} characters"
        )));
    }

    if !TIME_RE.is_match(&req.time) {
        return Err(CoreError::Validation(
            "Time must be in the format HH:MM or HH:MM:SS (24-hour)".into(),
        ));
    }
    let time = parse_clock_time(&req.time)?;

    let slot = match (req.weekday, req.date.as_deref()) {
        (Some(_), Some(_)) => {
            return Err(CoreError::Validation(
                "Either choose a date or a weekday, not both".into(),
            ));
        }
        (None, None) => {
            return Err(CoreError::Validation(
                "A weekday between 0 (Monday) and 6 (Sunday) or a date must be provided".into(),
            ));
        }
        (Some(weekday), None) => {
            if !(0..=6).contains(&weekday) {
                return Err(CoreError::Validation(
                    "Weekday must be between 0 (Monday) and 6 (Sunday)".into(),
                ));
            }
            SessionSlot::Weekday(weekday)
        }
        (None, Some(date)) => {
            if !DATE_RE.is_match(date) {
                return Err(CoreError::Validation(
                    "Date must be in the format YYYY-MM-DD".into(),
                ));
            }
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                CoreError::Validation("Date must be a valid calendar date".into())
            })?;
            SessionSlot::Date(date)
        }
    };

    if req.teacher_id <= 0 {
        return Err(CoreError::Validation(
            "Teacher id must be greater than 0".into(),
        ));
    }
    if req.classroom_id <= 0 {
        return Err(CoreError::Validation(
            "Classroom id must be greater than 0".into(),
        ));
    }

    Ok(NewSession {
        class_name: class_name.to_string(),
        time,
        slot,
        teacher_id: req.teacher_id,
        classroom_id: req.classroom_id,
        active: req.active,
    })
}

/// Parse a `HH:MM` or `HH:MM:SS` clock time.
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, CoreError> {
    let format = if raw.len() > 5 { "%H:%M:%S" } else { "%H:%M" };
    NaiveTime::parse_from_str(raw, format)
        .map_err(|_| CoreError::Validation("Time must be a valid clock time".into()))
}

fn default_true() -> bool {
    true
}
