//! Shared fixtures for storage integration tests.
//!
//! Users, classrooms, and relations are owned by external services in
//! production; tests seed them directly.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use eduportal_core::session::{NewSession, SessionSlot};
use eduportal_core::types::DbId;

pub async fn seed_user(pool: &PgPool, username: &str, user_type: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO users (username, first_name, last_name, user_type) \
         VALUES ($1, $2, 'Test', $3) RETURNING id",
    )
    .bind(username)
    .bind(username)
    .bind(user_type)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_general_classroom(pool: &PgPool, name: &str, manager_id: DbId) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO classrooms (name, class_type, max_students, manager_id) \
         VALUES ($1, 'GENERAL', 8, $2) RETURNING id",
    )
    .bind(name)
    .bind(manager_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_support_classroom(
    pool: &PgPool,
    name: &str,
    manager_id: DbId,
    sponsor_id: DbId,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO classrooms (name, class_type, max_students, manager_id, sponsor_id) \
         VALUES ($1, 'SUPPORT', 1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(manager_id)
    .bind(sponsor_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn enroll(pool: &PgPool, classroom_id: DbId, user_id: DbId) {
    sqlx::query("INSERT INTO classroom_members (classroom_id, user_id) VALUES ($1, $2)")
        .bind(classroom_id)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn link_parent(pool: &PgPool, parent_id: DbId, student_id: DbId) {
    sqlx::query("INSERT INTO parent_links (parent_id, student_id) VALUES ($1, $2)")
        .bind(parent_id)
        .bind(student_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn set_balance(pool: &PgPool, sponsor_id: DbId, balance: i32) {
    sqlx::query(
        "INSERT INTO credit_balances (sponsor_id, balance) VALUES ($1, $2) \
         ON CONFLICT ON CONSTRAINT uq_credit_sponsor DO UPDATE SET balance = $2",
    )
    .bind(sponsor_id)
    .bind(balance)
    .execute(pool)
    .await
    .unwrap();
}

pub fn weekday_session(
    classroom_id: DbId,
    teacher_id: DbId,
    weekday: i16,
    time: NaiveTime,
) -> NewSession {
    NewSession {
        class_name: "Algebra".into(),
        time,
        slot: SessionSlot::Weekday(weekday),
        teacher_id,
        classroom_id,
        active: true,
    }
}

pub fn dated_session(
    classroom_id: DbId,
    teacher_id: DbId,
    date: NaiveDate,
    time: NaiveTime,
) -> NewSession {
    NewSession {
        class_name: "Algebra".into(),
        time,
        slot: SessionSlot::Date(date),
        teacher_id,
        classroom_id,
        active: true,
    }
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}
