//! Directory handler: students and teachers visible to the acting role.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use eduportal_core::error::CoreError;
use eduportal_core::roles::Role;
use eduportal_db::models::user::{PersonRef, TeacherRef};
use eduportal_db::repositories::ScopeResolver;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Directory {
    pub students: Vec<PersonRef>,
    pub teachers: Vec<TeacherRef>,
}

/// GET /api/v1/directory
///
/// Parents see their children and those children's teachers; managers see
/// their classrooms' students and teachers; admins see everyone. Students
/// and teachers have no directory.
pub async fn get_directory(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    if !matches!(auth.role, Role::Parent | Role::Manager | Role::Admin) {
        return Err(AppError::Core(CoreError::Forbidden(
            "No directory for this role".into(),
        )));
    }

    let students = ScopeResolver::list_students(&state.pool, auth.role, auth.user_id).await?;
    let teachers = ScopeResolver::list_teachers(&state.pool, auth.role, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: Directory { students, teachers },
    }))
}
