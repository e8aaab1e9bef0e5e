//! Route definitions for the directory listing.
//!
//! ```text
//! GET    /        get_directory
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::directory;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(directory::get_directory))
}
