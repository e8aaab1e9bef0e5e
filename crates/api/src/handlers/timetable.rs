//! Handlers for timetable scheduling and listing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use eduportal_core::session::{self, ScheduleRequest};
use eduportal_db::repositories::{ScopeResolver, TimetableRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/timetable
///
/// Schedule a recurring or one-off session. Validation failures are 422,
/// slot conflicts 409, an exhausted SUPPORT credit balance 400; the insert
/// and the credit debit commit or roll back together.
pub async fn schedule_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ScheduleRequest>,
) -> AppResult<impl IntoResponse> {
    let session = session::validate(&input)?;
    let entry = TimetableRepo::schedule(&state.pool, &session).await?;

    tracing::info!(
        user_id = auth.user_id,
        entry_id = entry.id,
        classroom_id = entry.classroom_id,
        teacher_id = entry.teacher_id,
        "Session scheduled"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/timetable
///
/// The timetable as the acting user sees it.
pub async fn list_timetable(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = ScopeResolver::list_timetable(&state.pool, auth.role, auth.user_id).await?;
    Ok(Json(DataResponse { data: rows }))
}
