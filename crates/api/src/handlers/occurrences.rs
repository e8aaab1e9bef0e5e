//! Handlers for occurrence materialization and the "today" view.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use eduportal_core::types::DbId;
use eduportal_db::repositories::OccurrenceRepo;

use crate::auth::capability;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a manual materialization run.
#[derive(Debug, Serialize)]
pub struct MaterializeResult {
    /// Newly created occurrence rows; already-materialized entries count 0.
    pub created: u64,
}

/// One of today's sessions with a freshly minted capability token.
#[derive(Debug, Serialize)]
pub struct TodaySession {
    pub id: DbId,
    pub occurrence_id: DbId,
    pub subject: String,
    pub classroom_name: String,
    pub date_time: NaiveDateTime,
    pub cancelled: bool,
    pub link: String,
    pub token: String,
}

/// POST /api/v1/occurrences/materialize
///
/// Idempotent, admin-only manual trigger; the background task does the
/// same thing on its own timer. Safe to call repeatedly and concurrently.
pub async fn materialize_today(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let created = OccurrenceRepo::materialize_for_date(&state.pool, today).await?;

    tracing::info!(user_id = admin.user_id, created, %today, "Manual materialization run");

    Ok(Json(DataResponse {
        data: MaterializeResult { created },
    }))
}

/// GET /api/v1/occurrences/today
///
/// Today's sessions visible to the acting user, one per timetable entry,
/// each carrying a capability token for join/cancel.
pub async fn today_sessions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let rows =
        OccurrenceRepo::list_for_date(&state.pool, auth.role, auth.user_id, today).await?;

    let mut sessions = Vec::with_capacity(rows.len());
    for row in rows {
        let token = capability::mint(&row, auth.user_id, &state.config.capability)?;
        sessions.push(TodaySession {
            id: row.timetable_id,
            occurrence_id: row.occurrence_id,
            subject: row.subject,
            classroom_name: row.classroom_name,
            date_time: row.class_date.and_time(row.class_time),
            cancelled: row.cancelled,
            link: row.join_link,
            token,
        });
    }

    Ok(Json(DataResponse { data: sessions }))
}
