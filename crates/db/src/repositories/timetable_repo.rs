//! Repository for the `timetable_entries` table.
//!
//! Scheduling is the one multi-step mutation in this core: the slot insert
//! and the SUPPORT-credit debit run inside a single REPEATABLE READ
//! transaction, so a failed debit rolls the insert back.

use sqlx::PgPool;

use eduportal_core::session::{NewSession, SessionSlot};
use eduportal_core::types::DbId;

use crate::models::classroom::Classroom;
use crate::models::timetable::TimetableEntry;
use crate::repositories::{is_unique_violation, CreditRepo};

const ENTRY_COLUMNS: &str = "\
    id, class_name, time_of_day, classroom_id, teacher_id, active, \
    weekday, class_date, created_at, updated_at";

const CLASSROOM_COLUMNS: &str = "\
    id, name, class_type, max_students, manager_id, sponsor_id, join_link, \
    created_at, updated_at";

/// Why a scheduling attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("a session already exists for this classroom at this time")]
    Conflict,

    #[error("no credit available for sponsor {0}")]
    InsufficientCredit(DbId),

    #[error("classroom {0} not found")]
    ClassroomNotFound(DbId),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Scheduling and lookups for the `timetable_entries` table.
pub struct TimetableRepo;

impl TimetableRepo {
    /// Insert a validated session into the timetable.
    ///
    /// For SUPPORT classrooms the sponsor's credit balance is debited in
    /// the same transaction; `InsufficientCredit` leaves no timetable row
    /// behind. A slot collision maps to [`ScheduleError::Conflict`].
    pub async fn schedule(
        pool: &PgPool,
        session: &NewSession,
    ) -> Result<TimetableEntry, ScheduleError> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let classroom_query =
            format!("SELECT {CLASSROOM_COLUMNS} FROM classrooms WHERE id = $1");
        let classroom: Classroom = sqlx::query_as(&classroom_query)
            .bind(session.classroom_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ScheduleError::ClassroomNotFound(session.classroom_id))?;

        let (weekday, class_date) = match session.slot {
            SessionSlot::Weekday(day) => (Some(day), None),
            SessionSlot::Date(date) => (None, Some(date)),
        };

        let insert_query = format!(
            "INSERT INTO timetable_entries \
                 (class_name, time_of_day, classroom_id, teacher_id, active, weekday, class_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ENTRY_COLUMNS}"
        );
        let entry: TimetableEntry = sqlx::query_as(&insert_query)
            .bind(&session.class_name)
            .bind(session.time)
            .bind(session.classroom_id)
            .bind(session.teacher_id)
            .bind(session.active)
            .bind(weekday)
            .bind(class_date)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                if is_unique_violation(
                    &err,
                    &["uq_timetable_weekday_slot", "uq_timetable_date_slot"],
                ) {
                    ScheduleError::Conflict
                } else {
                    ScheduleError::Db(err)
                }
            })?;

        if classroom.is_support() {
            // ck_classrooms_support_shape guarantees a sponsor here.
            let sponsor_id = classroom
                .sponsor_id
                .ok_or(ScheduleError::ClassroomNotFound(classroom.id))?;
            let debited = CreditRepo::debit(&mut tx, sponsor_id).await?;
            if !debited {
                // Dropping the transaction rolls the insert back.
                tracing::info!(
                    sponsor_id,
                    classroom_id = classroom.id,
                    "Support scheduling refused: no credit"
                );
                return Err(ScheduleError::InsufficientCredit(sponsor_id));
            }
        }

        tx.commit().await?;
        Ok(entry)
    }

    /// Find an entry by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TimetableEntry>, sqlx::Error> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM timetable_entries WHERE id = $1");
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
