//! Integration tests for join/cancel records and report rows.

mod common;

use sqlx::PgPool;

use common::{d, enroll, seed_general_classroom, seed_user, t, weekday_session};
use eduportal_core::attendance::{self, AttendanceStatus, LATE_TOLERANCE_MINS};
use eduportal_core::roles::Role;
use eduportal_core::types::DbId;
use eduportal_db::repositories::{
    InsertOutcome, OccurrenceRepo, ParticipationRepo, ReportRepo, TimetableRepo,
};

// 2026-08-05 is a Wednesday (ISO weekday 2).
async fn seed_occurrence(pool: &PgPool) -> (DbId, DbId, DbId) {
    let manager = seed_user(pool, "manager", "MANAGER").await;
    let teacher = seed_user(pool, "teacher", "TEACHER").await;
    let student = seed_user(pool, "student", "STUDENT").await;
    let room = seed_general_classroom(pool, "Room A", manager).await;
    enroll(pool, room, student).await;

    TimetableRepo::schedule(pool, &weekday_session(room, teacher, 2, t(14, 0)))
        .await
        .unwrap();
    OccurrenceRepo::materialize_for_date(pool, d(2026, 8, 5))
        .await
        .unwrap();

    let occurrence_id: DbId = sqlx::query_scalar("SELECT id FROM class_occurrences LIMIT 1")
        .fetch_one(pool)
        .await
        .unwrap();
    (occurrence_id, student, teacher)
}

// ---------------------------------------------------------------------------
// Joining
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn joining_twice_is_idempotent(pool: PgPool) {
    let (occurrence, student, _) = seed_occurrence(&pool).await;

    let first =
        ParticipationRepo::record_joining(&pool, occurrence, student, Role::Student, t(14, 2))
            .await
            .unwrap();
    assert_eq!(first, InsertOutcome::Inserted);

    let second =
        ParticipationRepo::record_joining(&pool, occurrence, student, Role::Student, t(14, 9))
            .await
            .unwrap();
    assert_eq!(second, InsertOutcome::AlreadyRecorded);

    let count = ParticipationRepo::count_joinings(&pool, occurrence).await.unwrap();
    assert_eq!(count, 1, "exactly one joining row per occurrence and user");
}

#[sqlx::test(migrations = "./migrations")]
async fn different_users_join_the_same_occurrence(pool: PgPool) {
    let (occurrence, student, teacher) = seed_occurrence(&pool).await;

    ParticipationRepo::record_joining(&pool, occurrence, student, Role::Student, t(14, 2))
        .await
        .unwrap();
    ParticipationRepo::record_joining(&pool, occurrence, teacher, Role::Teacher, t(13, 55))
        .await
        .unwrap();

    let count = ParticipationRepo::count_joinings(&pool, occurrence).await.unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn joining_unknown_occurrence_is_a_storage_error(pool: PgPool) {
    let student = seed_user(&pool, "student", "STUDENT").await;

    let result =
        ParticipationRepo::record_joining(&pool, 9999, student, Role::Student, t(14, 2)).await;
    assert!(result.is_err(), "FK violations must propagate, not idempote");
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn cancelling_twice_is_idempotent(pool: PgPool) {
    let (occurrence, student, teacher) = seed_occurrence(&pool).await;

    let first = ParticipationRepo::record_cancellation(&pool, occurrence, teacher)
        .await
        .unwrap();
    assert_eq!(first, InsertOutcome::Inserted);

    // A second canceller still lands on the unique occurrence constraint.
    let second = ParticipationRepo::record_cancellation(&pool, occurrence, student)
        .await
        .unwrap();
    assert_eq!(second, InsertOutcome::AlreadyRecorded);

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM class_cancellations WHERE occurrence_id = $1")
            .bind(occurrence)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Report rows and status derivation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn cancelled_overrides_existing_join_in_reports(pool: PgPool) {
    let (occurrence, student, teacher) = seed_occurrence(&pool).await;

    ParticipationRepo::record_joining(&pool, occurrence, student, Role::Student, t(14, 2))
        .await
        .unwrap();
    ParticipationRepo::record_cancellation(&pool, occurrence, teacher)
        .await
        .unwrap();

    let rows = ReportRepo::list_for_user(&pool, Role::Student, student).await.unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert!(row.cancelled);
    assert!(row.joined_time.is_some());

    let status = attendance::derive_status(
        row.cancelled,
        row.joined_time,
        row.class_time,
        LATE_TOLERANCE_MINS,
    );
    assert_eq!(status, AttendanceStatus::Cancelled);
}

#[sqlx::test(migrations = "./migrations")]
async fn late_join_derives_late_status(pool: PgPool) {
    let (occurrence, student, _) = seed_occurrence(&pool).await;

    ParticipationRepo::record_joining(&pool, occurrence, student, Role::Student, t(14, 15))
        .await
        .unwrap();

    let rows = ReportRepo::list_for_user(&pool, Role::Student, student).await.unwrap();
    let row = &rows[0];
    let status = attendance::derive_status(
        row.cancelled,
        row.joined_time,
        row.class_time,
        LATE_TOLERANCE_MINS,
    );
    assert_eq!(status, AttendanceStatus::Late);
}

#[sqlx::test(migrations = "./migrations")]
async fn unjoined_occurrence_derives_missed(pool: PgPool) {
    let (_, student, _) = seed_occurrence(&pool).await;

    let rows = ReportRepo::list_for_user(&pool, Role::Student, student).await.unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    let status = attendance::derive_status(
        row.cancelled,
        row.joined_time,
        row.class_time,
        LATE_TOLERANCE_MINS,
    );
    assert_eq!(status, AttendanceStatus::Missed);
}

#[sqlx::test(migrations = "./migrations")]
async fn reports_are_scoped_to_the_acting_user(pool: PgPool) {
    let (_, _, teacher) = seed_occurrence(&pool).await;
    let outsider = seed_user(&pool, "outsider", "STUDENT").await;

    let teacher_rows = ReportRepo::list_for_user(&pool, Role::Teacher, teacher).await.unwrap();
    assert_eq!(teacher_rows.len(), 1);

    let outsider_rows = ReportRepo::list_for_user(&pool, Role::Student, outsider)
        .await
        .unwrap();
    assert!(outsider_rows.is_empty());
}
