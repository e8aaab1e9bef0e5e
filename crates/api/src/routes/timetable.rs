//! Route definitions for the timetable store.
//!
//! ```text
//! GET    /        list_timetable
//! POST   /        schedule_session
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::timetable;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(timetable::list_timetable).post(timetable::schedule_session),
    )
}
