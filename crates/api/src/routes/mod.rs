pub mod admin;
pub mod catalog;
pub mod courses;
pub mod health;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                    WebSocket (admin metric push)
///
/// /packages                              catalog (public)
///
/// /courses/{course_id}/access            entitlement check (GET)
/// /courses/{course_id}/enroll            idempotent enroll (POST)
/// /courses/{course_id}/playback/start    open session (POST)
/// /courses/{course_id}/playback/position position tick (PUT)
/// /courses/{course_id}/playback          end session (DELETE)
///
/// /user/enrollments                      own enrollments (GET)
/// /user/dashboard                        dashboard aggregate (GET)
///
/// /admin/metrics                         projection snapshot (admin only)
/// /admin/payouts/pending                 pending payouts (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Package catalog (public).
        .nest("/packages", catalog::router())
        // Course-scoped access, enrollment, and playback.
        .nest("/courses", courses::router())
        // Student-facing views.
        .nest("/user", user::router())
        // Admin intelligence dashboard.
        .nest("/admin", admin::router())
}
