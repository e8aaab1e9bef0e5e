//! Repository for join and cancellation records.
//!
//! Both inserts are insert-or-confirm-exists: a duplicate on the named
//! `uq_` constraint reports [`InsertOutcome::AlreadyRecorded`] instead of
//! an error. Any other storage failure propagates untouched.

use chrono::NaiveTime;
use sqlx::PgPool;

use eduportal_core::roles::Role;
use eduportal_core::types::DbId;

use crate::repositories::is_unique_violation;

/// Result of an idempotent insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyRecorded,
}

/// Writes to `class_joinings` and `class_cancellations`.
pub struct ParticipationRepo;

impl ParticipationRepo {
    /// Record that a user joined an occurrence. Re-joining is success.
    pub async fn record_joining(
        pool: &PgPool,
        occurrence_id: DbId,
        user_id: DbId,
        joiner_role: Role,
        joined_time: NaiveTime,
    ) -> Result<InsertOutcome, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO class_joinings (occurrence_id, user_id, joiner_role, joined_time) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(occurrence_id)
        .bind(user_id)
        .bind(joiner_role.as_str())
        .bind(joined_time)
        .execute(pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if is_unique_violation(&err, &["uq_joining_occurrence_user"]) => {
                Ok(InsertOutcome::AlreadyRecorded)
            }
            Err(err) => Err(err),
        }
    }

    /// Record a cancellation for an occurrence. Cancelling twice is success.
    pub async fn record_cancellation(
        pool: &PgPool,
        occurrence_id: DbId,
        canceled_by: DbId,
    ) -> Result<InsertOutcome, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO class_cancellations (occurrence_id, canceled_by) \
             VALUES ($1, $2)",
        )
        .bind(occurrence_id)
        .bind(canceled_by)
        .execute(pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if is_unique_violation(&err, &["uq_cancellation_occurrence"]) => {
                Ok(InsertOutcome::AlreadyRecorded)
            }
            Err(err) => Err(err),
        }
    }

    /// Count joining rows for an occurrence (used by tests and reporting).
    pub async fn count_joinings(
        pool: &PgPool,
        occurrence_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM class_joinings WHERE occurrence_id = $1")
            .bind(occurrence_id)
            .fetch_one(pool)
            .await
    }
}
