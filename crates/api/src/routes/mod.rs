pub mod credits;
pub mod directory;
pub mod health;
pub mod occurrences;
pub mod reports;
pub mod timetable;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /timetable                     GET list (role-scoped), POST schedule
///
/// /occurrences/today             GET today's sessions + capability tokens
/// /occurrences/materialize       POST manual materialization (admin only)
/// /occurrences/join              POST redeem capability to join
/// /occurrences/cancel            POST redeem capability to cancel
///
/// /reports                       GET attendance reports (role-scoped)
/// /directory                     GET visible students + teachers
/// /credits                       GET sponsor credit balance
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/timetable", timetable::router())
        .nest("/occurrences", occurrences::router())
        .nest("/reports", reports::router())
        .nest("/directory", directory::router())
        .nest("/credits", credits::router())
}
