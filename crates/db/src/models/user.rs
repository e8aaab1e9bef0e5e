use serde::Serialize;
use sqlx::FromRow;

use eduportal_core::types::{DbId, Timestamp};

/// A row from the `users` table (owned by the external identity service).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal person reference for directory listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonRef {
    pub id: DbId,
    pub name: String,
}

/// A teacher with the subject label they appear under in the timetable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeacherRef {
    pub id: DbId,
    pub name: String,
    pub subject: String,
}
