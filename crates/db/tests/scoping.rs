//! Integration tests for the role resolver.

mod common;

use sqlx::PgPool;

use common::{
    enroll, link_parent, seed_general_classroom, seed_support_classroom, seed_user, set_balance,
    t, weekday_session,
};
use eduportal_core::roles::Role;
use eduportal_db::repositories::{ScopeResolver, TimetableRepo};

#[sqlx::test(migrations = "./migrations")]
async fn classrooms_are_scoped_per_role(pool: PgPool) {
    let manager = seed_user(&pool, "manager", "MANAGER").await;
    let other_manager = seed_user(&pool, "manager2", "MANAGER").await;
    let teacher = seed_user(&pool, "teacher", "TEACHER").await;
    let student = seed_user(&pool, "student", "STUDENT").await;
    let parent = seed_user(&pool, "parent", "PARENT").await;
    let admin = seed_user(&pool, "admin", "ADMIN").await;

    let room_a = seed_general_classroom(&pool, "Room A", manager).await;
    let room_b = seed_general_classroom(&pool, "Room B", other_manager).await;
    set_balance(&pool, parent, 1).await;
    let support = seed_support_classroom(&pool, "1:1 Math", manager, parent).await;

    enroll(&pool, room_a, student).await;
    link_parent(&pool, parent, student).await;
    TimetableRepo::schedule(&pool, &weekday_session(room_b, teacher, 1, t(10, 0)))
        .await
        .unwrap();

    let student_rooms = ScopeResolver::list_classroom_ids(&pool, Role::Student, student)
        .await
        .unwrap();
    assert_eq!(student_rooms, vec![room_a]);

    let teacher_rooms = ScopeResolver::list_classroom_ids(&pool, Role::Teacher, teacher)
        .await
        .unwrap();
    assert_eq!(teacher_rooms, vec![room_b]);

    // Parent sees the sponsored room and the child's room.
    let mut parent_rooms = ScopeResolver::list_classroom_ids(&pool, Role::Parent, parent)
        .await
        .unwrap();
    parent_rooms.sort();
    assert_eq!(parent_rooms, vec![room_a, support]);

    let manager_rooms = ScopeResolver::list_classroom_ids(&pool, Role::Manager, manager)
        .await
        .unwrap();
    assert_eq!(manager_rooms.len(), 2);

    let admin_rooms = ScopeResolver::list_classroom_ids(&pool, Role::Admin, admin)
        .await
        .unwrap();
    assert_eq!(admin_rooms.len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn directory_listings_follow_role_visibility(pool: PgPool) {
    let manager = seed_user(&pool, "manager", "MANAGER").await;
    let teacher = seed_user(&pool, "teacher", "TEACHER").await;
    let student = seed_user(&pool, "student", "STUDENT").await;
    let parent = seed_user(&pool, "parent", "PARENT").await;

    let room = seed_general_classroom(&pool, "Room A", manager).await;
    enroll(&pool, room, student).await;
    link_parent(&pool, parent, student).await;
    TimetableRepo::schedule(&pool, &weekday_session(room, teacher, 1, t(10, 0)))
        .await
        .unwrap();

    let parent_students = ScopeResolver::list_students(&pool, Role::Parent, parent)
        .await
        .unwrap();
    assert_eq!(parent_students.len(), 1);
    assert_eq!(parent_students[0].id, student);

    let manager_students = ScopeResolver::list_students(&pool, Role::Manager, manager)
        .await
        .unwrap();
    assert_eq!(manager_students.len(), 1);

    let parent_teachers = ScopeResolver::list_teachers(&pool, Role::Parent, parent)
        .await
        .unwrap();
    assert_eq!(parent_teachers.len(), 1);
    assert_eq!(parent_teachers[0].id, teacher);
    assert_eq!(parent_teachers[0].subject, "Algebra");

    // Students and teachers get no directory.
    let none = ScopeResolver::list_students(&pool, Role::Student, student)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn timetable_view_is_scoped_and_labelled(pool: PgPool) {
    let manager = seed_user(&pool, "manager", "MANAGER").await;
    let teacher = seed_user(&pool, "teacher", "TEACHER").await;
    let student = seed_user(&pool, "student", "STUDENT").await;

    let room = seed_general_classroom(&pool, "Room A", manager).await;
    enroll(&pool, room, student).await;
    TimetableRepo::schedule(&pool, &weekday_session(room, teacher, 4, t(11, 30)))
        .await
        .unwrap();

    let rows = ScopeResolver::list_timetable(&pool, Role::Student, student)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].subject, "Algebra");
    assert_eq!(rows[0].weekday, Some(4));
    assert_eq!(rows[0].teacher, "teacher Test");

    let stranger = seed_user(&pool, "stranger", "STUDENT").await;
    let empty = ScopeResolver::list_timetable(&pool, Role::Student, stranger)
        .await
        .unwrap();
    assert!(empty.is_empty());
}
