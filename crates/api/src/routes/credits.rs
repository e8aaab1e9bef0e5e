//! Route definitions for the credit balance view.
//!
//! ```text
//! GET    /        get_balance
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::credits;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(credits::get_balance))
}
