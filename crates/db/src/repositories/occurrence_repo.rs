//! Repository for the `class_occurrences` table.
//!
//! Materialization is idempotent by construction: the insert confirms
//! existing rows via `uq_occurrence_timetable_date` instead of failing.
//! Concurrent runs (timer vs. manual trigger) need no locking.

use chrono::NaiveDate;
use sqlx::PgPool;

use eduportal_core::clock;
use eduportal_core::roles::Role;
use eduportal_core::types::DbId;

use crate::models::occurrence::{ClassOccurrence, TodaySessionRow};

const OCCURRENCE_COLUMNS: &str = "\
    id, timetable_id, classroom_id, class_date, class_time, teacher_id, \
    sponsor_id, created_at, updated_at";

const TODAY_COLUMNS: &str = "\
    o.id AS occurrence_id, o.timetable_id, o.classroom_id, o.class_date, \
    o.class_time, t.class_name AS subject, c.name AS classroom_name, \
    c.join_link, (cc.id IS NOT NULL) AS cancelled";

const TODAY_FROM: &str = "\
    FROM class_occurrences o \
    INNER JOIN timetable_entries t ON t.id = o.timetable_id \
    INNER JOIN classrooms c ON c.id = o.classroom_id \
    LEFT JOIN class_cancellations cc ON cc.occurrence_id = o.id";

/// Materialization and day-level queries for class occurrences.
pub struct OccurrenceRepo;

impl OccurrenceRepo {
    /// Project every active timetable entry matching `date` (by ISO weekday
    /// or by exact date) into one occurrence row. Entries already
    /// materialized for that date are skipped; the returned count covers
    /// newly created rows only.
    pub async fn materialize_for_date(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let weekday = clock::iso_weekday(date);
        let result = sqlx::query(
            "INSERT INTO class_occurrences \
                 (timetable_id, classroom_id, class_date, class_time, teacher_id, sponsor_id) \
             SELECT t.id, t.classroom_id, $1, t.time_of_day, t.teacher_id, c.sponsor_id \
             FROM timetable_entries t \
             INNER JOIN classrooms c ON c.id = t.classroom_id \
             WHERE t.active AND (t.weekday = $2 OR t.class_date = $1) \
             ON CONFLICT ON CONSTRAINT uq_occurrence_timetable_date DO NOTHING",
        )
        .bind(date)
        .bind(weekday)
        .execute(pool)
        .await?;

        let created = result.rows_affected();
        tracing::debug!(%date, weekday, created, "Occurrence materialization pass");
        Ok(created)
    }

    /// Find an occurrence by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ClassOccurrence>, sqlx::Error> {
        let query = format!("SELECT {OCCURRENCE_COLUMNS} FROM class_occurrences WHERE id = $1");
        sqlx::query_as::<_, ClassOccurrence>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the occurrences on `date` visible to the acting user, one row
    /// per timetable entry, with the cancelled flag resolved.
    pub async fn list_for_date(
        pool: &PgPool,
        role: Role,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<TodaySessionRow>, sqlx::Error> {
        match role {
            Role::Student => Self::list_for_student(pool, user_id, date).await,
            Role::Teacher => Self::list_for_teacher(pool, user_id, date).await,
            Role::Parent => Self::list_for_parent(pool, user_id, date).await,
            Role::Manager => Self::list_for_manager(pool, user_id, date).await,
            Role::Admin => Self::list_for_admin(pool, date).await,
        }
    }

    async fn list_for_student(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<TodaySessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (o.timetable_id) {TODAY_COLUMNS} {TODAY_FROM} \
             WHERE o.class_date = $1 \
               AND o.classroom_id IN \
                   (SELECT classroom_id FROM classroom_members WHERE user_id = $2) \
             ORDER BY o.timetable_id"
        );
        sqlx::query_as::<_, TodaySessionRow>(&query)
            .bind(date)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn list_for_teacher(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<TodaySessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (o.timetable_id) {TODAY_COLUMNS} {TODAY_FROM} \
             WHERE o.class_date = $1 AND o.teacher_id = $2 \
             ORDER BY o.timetable_id"
        );
        sqlx::query_as::<_, TodaySessionRow>(&query)
            .bind(date)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn list_for_parent(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<TodaySessionRow>, sqlx::Error> {
        // Sponsored SUPPORT rooms plus the rooms of linked students.
        let query = format!(
            "SELECT DISTINCT ON (o.timetable_id) {TODAY_COLUMNS} {TODAY_FROM} \
             WHERE o.class_date = $1 \
               AND (c.sponsor_id = $2 \
                    OR o.classroom_id IN \
                        (SELECT cm.classroom_id FROM classroom_members cm \
                         INNER JOIN parent_links pl ON pl.student_id = cm.user_id \
                         WHERE pl.parent_id = $2)) \
             ORDER BY o.timetable_id"
        );
        sqlx::query_as::<_, TodaySessionRow>(&query)
            .bind(date)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn list_for_manager(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<TodaySessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (o.timetable_id) {TODAY_COLUMNS} {TODAY_FROM} \
             WHERE o.class_date = $1 AND c.manager_id = $2 \
             ORDER BY o.timetable_id"
        );
        sqlx::query_as::<_, TodaySessionRow>(&query)
            .bind(date)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn list_for_admin(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Vec<TodaySessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (o.timetable_id) {TODAY_COLUMNS} {TODAY_FROM} \
             WHERE o.class_date = $1 \
             ORDER BY o.timetable_id"
        );
        sqlx::query_as::<_, TodaySessionRow>(&query)
            .bind(date)
            .fetch_all(pool)
            .await
    }
}
