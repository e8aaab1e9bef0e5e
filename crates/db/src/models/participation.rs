use chrono::NaiveTime;
use serde::Serialize;
use sqlx::FromRow;

use eduportal_core::types::{DbId, Timestamp};

/// A row from the `class_joinings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassJoining {
    pub id: DbId,
    pub occurrence_id: DbId,
    pub user_id: DbId,
    pub joiner_role: String,
    pub joined_time: NaiveTime,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `class_cancellations` table. At most one per occurrence;
/// presence marks the occurrence terminally cancelled.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassCancellation {
    pub id: DbId,
    pub occurrence_id: DbId,
    pub canceled_by: DbId,
    pub canceled_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
