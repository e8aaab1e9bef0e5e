//! Attendance report handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use eduportal_core::attendance::{self, LATE_TOLERANCE_MINS};
use eduportal_db::models::report::AttendanceReport;
use eduportal_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports
///
/// One row per occurrence visible to the acting user, with the derived
/// attendance status and human-facing labels.
pub async fn get_reports(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = ReportRepo::list_for_user(&state.pool, auth.role, auth.user_id).await?;

    let reports: Vec<AttendanceReport> = rows
        .into_iter()
        .map(|row| {
            let status = attendance::derive_status(
                row.cancelled,
                row.joined_time,
                row.class_time,
                LATE_TOLERANCE_MINS,
            );
            AttendanceReport {
                status,
                subject: row.class_name.clone(),
                class_name: row.class_name,
                date: attendance::format_report_date(row.class_date),
                time: row.class_time,
                teacher: row.teacher,
                classroom: row.classroom,
            }
        })
        .collect();

    Ok(Json(DataResponse { data: reports }))
}
