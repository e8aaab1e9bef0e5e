//! Route definitions for attendance reports.
//!
//! ```text
//! GET    /        get_reports
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(reports::get_reports))
}
