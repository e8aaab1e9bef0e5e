//! Route definitions for occurrences and the join/cancel workflow.
//!
//! ```text
//! GET    /today          today_sessions
//! POST   /materialize    materialize_today (admin)
//! POST   /join           join
//! POST   /cancel         cancel
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{occurrences, workflow};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/today", get(occurrences::today_sessions))
        .route("/materialize", post(occurrences::materialize_today))
        .route("/join", post(workflow::join))
        .route("/cancel", post(workflow::cancel))
}
