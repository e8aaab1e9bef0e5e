//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-step mutations open their
//! own transaction so callers never hold partial state.

pub mod credit_repo;
pub mod occurrence_repo;
pub mod participation_repo;
pub mod report_repo;
pub mod scope_repo;
pub mod timetable_repo;
pub mod user_repo;

pub use credit_repo::CreditRepo;
pub use occurrence_repo::OccurrenceRepo;
pub use participation_repo::{InsertOutcome, ParticipationRepo};
pub use report_repo::ReportRepo;
pub use scope_repo::ScopeResolver;
pub use timetable_repo::{ScheduleError, TimetableRepo};
pub use user_repo::UserRepo;

/// PostgreSQL error code for unique-constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Whether `err` is a unique violation on one of the named constraints.
///
/// Duplicate-key reinterpretation is only ever allowed for a specifically
/// identified constraint; any other storage error must propagate.
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraints: &[&str]) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err
                    .constraint()
                    .is_some_and(|name| constraints.contains(&name))
        }
        _ => false,
    }
}
