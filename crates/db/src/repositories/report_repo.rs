//! Repository feeding the attendance reporter.
//!
//! Produces one raw row per occurrence with its optional cancellation and
//! joining records and display labels; status derivation is left to
//! `eduportal_core::attendance`.

use sqlx::PgPool;

use eduportal_core::roles::Role;
use eduportal_core::types::DbId;

use crate::models::report::AttendanceRow;

const REPORT_COLUMNS: &str = "\
    o.id AS occurrence_id, o.class_date, o.class_time, cj.joined_time, \
    (cc.id IS NOT NULL) AS cancelled, t.class_name, \
    u.first_name || ' ' || u.last_name AS teacher, c.name AS classroom";

const REPORT_FROM: &str = "\
    FROM class_occurrences o \
    LEFT JOIN class_cancellations cc ON cc.occurrence_id = o.id \
    LEFT JOIN class_joinings cj ON cj.occurrence_id = o.id \
    INNER JOIN timetable_entries t ON t.id = o.timetable_id \
    INNER JOIN classrooms c ON c.id = o.classroom_id \
    INNER JOIN users u ON u.id = o.teacher_id";

const REPORT_ORDER: &str = "ORDER BY o.class_date DESC, o.class_time DESC";

/// Role-scoped attendance rows.
pub struct ReportRepo;

impl ReportRepo {
    /// List the attendance rows visible to the acting user.
    pub async fn list_for_user(
        pool: &PgPool,
        role: Role,
        user_id: DbId,
    ) -> Result<Vec<AttendanceRow>, sqlx::Error> {
        match role {
            Role::Student => Self::list_for_student(pool, user_id).await,
            Role::Teacher => Self::list_for_teacher(pool, user_id).await,
            Role::Parent => Self::list_for_parent(pool, user_id).await,
            Role::Manager => Self::list_for_manager(pool, user_id).await,
            Role::Admin => Self::list_for_admin(pool).await,
        }
    }

    async fn list_for_student(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttendanceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {REPORT_COLUMNS} {REPORT_FROM} \
             WHERE o.classroom_id IN \
                 (SELECT classroom_id FROM classroom_members WHERE user_id = $1) \
             {REPORT_ORDER}"
        );
        sqlx::query_as::<_, AttendanceRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn list_for_teacher(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttendanceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {REPORT_COLUMNS} {REPORT_FROM} WHERE o.teacher_id = $1 {REPORT_ORDER}"
        );
        sqlx::query_as::<_, AttendanceRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn list_for_parent(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttendanceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {REPORT_COLUMNS} {REPORT_FROM} \
             WHERE o.sponsor_id = $1 \
                OR o.classroom_id IN \
                    (SELECT cm.classroom_id FROM classroom_members cm \
                     INNER JOIN parent_links pl ON pl.student_id = cm.user_id \
                     WHERE pl.parent_id = $1) \
             {REPORT_ORDER}"
        );
        sqlx::query_as::<_, AttendanceRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn list_for_manager(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttendanceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {REPORT_COLUMNS} {REPORT_FROM} WHERE c.manager_id = $1 {REPORT_ORDER}"
        );
        sqlx::query_as::<_, AttendanceRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn list_for_admin(pool: &PgPool) -> Result<Vec<AttendanceRow>, sqlx::Error> {
        let query = format!("SELECT {REPORT_COLUMNS} {REPORT_FROM} {REPORT_ORDER}");
        sqlx::query_as::<_, AttendanceRow>(&query)
            .fetch_all(pool)
            .await
    }
}
