//! Route definitions for student-facing views.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::{dashboard, enrollment};
use crate::state::AppState;

/// User routes mounted at `/user`.
///
/// ```text
/// GET  /enrollments  -> list_my_enrollments
/// GET  /dashboard    -> get_dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enrollments", get(enrollment::list_my_enrollments))
        .route("/dashboard", get(dashboard::get_dashboard))
}
