//! Route definitions for course-scoped access, enrollment, and playback.
//!
//! All endpoints require authentication.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{catalog, enrollment, playback};
use crate::state::AppState;

/// Course routes mounted at `/courses`.
///
/// ```text
/// GET    /{course_id}/access             -> course_access
/// POST   /{course_id}/enroll             -> enroll
/// POST   /{course_id}/playback/start     -> start_playback
/// PUT    /{course_id}/playback/position  -> playback_position
/// DELETE /{course_id}/playback           -> end_playback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{course_id}/access", get(catalog::course_access))
        .route("/{course_id}/enroll", post(enrollment::enroll))
        .route("/{course_id}/playback/start", post(playback::start_playback))
        .route(
            "/{course_id}/playback/position",
            put(playback::playback_position),
        )
        .route("/{course_id}/playback", delete(playback::end_playback))
}
