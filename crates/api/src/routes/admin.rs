//! Route definitions for the admin intelligence dashboard.
//!
//! All endpoints require the admin role.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// GET  /metrics          -> metrics
/// GET  /payouts/pending  -> pending_payouts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(admin::metrics))
        .route("/payouts/pending", get(admin::pending_payouts))
}
