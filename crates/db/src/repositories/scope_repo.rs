//! Role resolver: what a user is allowed to see.
//!
//! One uniform contract (`list_classroom_ids`, `list_students`,
//! `list_teachers`, `list_timetable`) dispatching on the [`Role`] enum to
//! one private query per role variant. Roles with no sensible answer for a
//! listing (e.g. students asked for "their students") get an empty list;
//! authorization proper is the API layer's job.

use sqlx::PgPool;

use eduportal_core::roles::Role;
use eduportal_core::types::DbId;

use crate::models::timetable::TimetableViewRow;
use crate::models::user::{PersonRef, TeacherRef};

const TIMETABLE_VIEW_COLUMNS: &str = "\
    c.class_type, c.id AS classroom_id, t.weekday, t.class_date, t.time_of_day, \
    u.first_name || ' ' || u.last_name AS teacher, t.class_name AS subject";

const TIMETABLE_VIEW_FROM: &str = "\
    FROM timetable_entries t \
    INNER JOIN users u ON u.id = t.teacher_id \
    INNER JOIN classrooms c ON c.id = t.classroom_id";

/// Role-scoped visibility queries.
pub struct ScopeResolver;

impl ScopeResolver {
    /// IDs of the classrooms visible to the user.
    pub async fn list_classroom_ids(
        pool: &PgPool,
        role: Role,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        match role {
            Role::Student => {
                sqlx::query_scalar(
                    "SELECT classroom_id FROM classroom_members WHERE user_id = $1",
                )
                .bind(user_id)
                .fetch_all(pool)
                .await
            }
            Role::Teacher => {
                sqlx::query_scalar(
                    "SELECT DISTINCT classroom_id FROM timetable_entries WHERE teacher_id = $1",
                )
                .bind(user_id)
                .fetch_all(pool)
                .await
            }
            Role::Parent => {
                sqlx::query_scalar(
                    "SELECT id FROM classrooms WHERE sponsor_id = $1 \
                     UNION \
                     SELECT cm.classroom_id FROM classroom_members cm \
                     INNER JOIN parent_links pl ON pl.student_id = cm.user_id \
                     WHERE pl.parent_id = $1",
                )
                .bind(user_id)
                .fetch_all(pool)
                .await
            }
            Role::Manager => {
                sqlx::query_scalar("SELECT id FROM classrooms WHERE manager_id = $1")
                    .bind(user_id)
                    .fetch_all(pool)
                    .await
            }
            Role::Admin => {
                sqlx::query_scalar("SELECT id FROM classrooms")
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Students visible to the user (parents: linked children; managers:
    /// students in managed rooms; admins: every enrolled student).
    pub async fn list_students(
        pool: &PgPool,
        role: Role,
        user_id: DbId,
    ) -> Result<Vec<PersonRef>, sqlx::Error> {
        match role {
            Role::Parent => Self::students_for_parent(pool, user_id).await,
            Role::Manager => Self::students_for_manager(pool, user_id).await,
            Role::Admin => Self::students_for_admin(pool).await,
            Role::Student | Role::Teacher => Ok(Vec::new()),
        }
    }

    /// Teachers visible to the user, labelled by the classes they teach.
    pub async fn list_teachers(
        pool: &PgPool,
        role: Role,
        user_id: DbId,
    ) -> Result<Vec<TeacherRef>, sqlx::Error> {
        match role {
            Role::Parent => Self::teachers_for_parent(pool, user_id).await,
            Role::Manager => Self::teachers_for_manager(pool, user_id).await,
            Role::Admin => Self::teachers_for_admin(pool).await,
            Role::Student | Role::Teacher => Ok(Vec::new()),
        }
    }

    /// The timetable as the user sees it, joined with display names.
    pub async fn list_timetable(
        pool: &PgPool,
        role: Role,
        user_id: DbId,
    ) -> Result<Vec<TimetableViewRow>, sqlx::Error> {
        match role {
            Role::Student => Self::timetable_for_student(pool, user_id).await,
            Role::Teacher => Self::timetable_for_teacher(pool, user_id).await,
            Role::Parent => Self::timetable_for_parent(pool, user_id).await,
            Role::Manager => Self::timetable_for_manager(pool, user_id).await,
            Role::Admin => Self::timetable_for_admin(pool).await,
        }
    }

    // -- students ----------------------------------------------------------

    async fn students_for_parent(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PersonRef>, sqlx::Error> {
        sqlx::query_as(
            "SELECT DISTINCT u.id, u.first_name || ' ' || u.last_name AS name \
             FROM users u \
             INNER JOIN parent_links pl ON pl.student_id = u.id \
             WHERE pl.parent_id = $1 \
             ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    async fn students_for_manager(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PersonRef>, sqlx::Error> {
        sqlx::query_as(
            "SELECT DISTINCT u.id, u.first_name || ' ' || u.last_name AS name \
             FROM users u \
             INNER JOIN classroom_members cm ON cm.user_id = u.id \
             INNER JOIN classrooms c ON c.id = cm.classroom_id \
             WHERE c.manager_id = $1 AND u.user_type = 'STUDENT' \
             ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    async fn students_for_admin(pool: &PgPool) -> Result<Vec<PersonRef>, sqlx::Error> {
        sqlx::query_as(
            "SELECT DISTINCT u.id, u.first_name || ' ' || u.last_name AS name \
             FROM users u \
             INNER JOIN classroom_members cm ON cm.user_id = u.id \
             WHERE u.user_type = 'STUDENT' \
             ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    // -- teachers ----------------------------------------------------------

    async fn teachers_for_parent(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TeacherRef>, sqlx::Error> {
        sqlx::query_as(
            "SELECT DISTINCT u.id, u.first_name || ' ' || u.last_name AS name, \
                    t.class_name AS subject \
             FROM timetable_entries t \
             INNER JOIN users u ON u.id = t.teacher_id \
             WHERE t.classroom_id IN \
                 (SELECT id FROM classrooms WHERE sponsor_id = $1 \
                  UNION \
                  SELECT cm.classroom_id FROM classroom_members cm \
                  INNER JOIN parent_links pl ON pl.student_id = cm.user_id \
                  WHERE pl.parent_id = $1) \
             ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    async fn teachers_for_manager(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TeacherRef>, sqlx::Error> {
        sqlx::query_as(
            "SELECT DISTINCT u.id, u.first_name || ' ' || u.last_name AS name, \
                    t.class_name AS subject \
             FROM timetable_entries t \
             INNER JOIN users u ON u.id = t.teacher_id \
             INNER JOIN classrooms c ON c.id = t.classroom_id \
             WHERE c.manager_id = $1 \
             ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    async fn teachers_for_admin(pool: &PgPool) -> Result<Vec<TeacherRef>, sqlx::Error> {
        sqlx::query_as(
            "SELECT DISTINCT u.id, u.first_name || ' ' || u.last_name AS name, \
                    t.class_name AS subject \
             FROM timetable_entries t \
             INNER JOIN users u ON u.id = t.teacher_id \
             ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    // -- timetable ---------------------------------------------------------

    async fn timetable_for_student(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TimetableViewRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TIMETABLE_VIEW_COLUMNS} {TIMETABLE_VIEW_FROM} \
             WHERE t.classroom_id IN \
                 (SELECT classroom_id FROM classroom_members WHERE user_id = $1)"
        );
        sqlx::query_as::<_, TimetableViewRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn timetable_for_teacher(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TimetableViewRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TIMETABLE_VIEW_COLUMNS} {TIMETABLE_VIEW_FROM} WHERE t.teacher_id = $1"
        );
        sqlx::query_as::<_, TimetableViewRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn timetable_for_parent(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TimetableViewRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TIMETABLE_VIEW_COLUMNS} {TIMETABLE_VIEW_FROM} \
             WHERE c.sponsor_id = $1 \
                OR t.classroom_id IN \
                    (SELECT cm.classroom_id FROM classroom_members cm \
                     INNER JOIN parent_links pl ON pl.student_id = cm.user_id \
                     WHERE pl.parent_id = $1)"
        );
        sqlx::query_as::<_, TimetableViewRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn timetable_for_manager(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TimetableViewRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TIMETABLE_VIEW_COLUMNS} {TIMETABLE_VIEW_FROM} WHERE c.manager_id = $1"
        );
        sqlx::query_as::<_, TimetableViewRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn timetable_for_admin(pool: &PgPool) -> Result<Vec<TimetableViewRow>, sqlx::Error> {
        let query = format!("SELECT {TIMETABLE_VIEW_COLUMNS} {TIMETABLE_VIEW_FROM}");
        sqlx::query_as::<_, TimetableViewRow>(&query)
            .fetch_all(pool)
            .await
    }
}
