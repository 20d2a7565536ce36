//! Route definitions for the package catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted at `/packages`.
///
/// ```text
/// GET  /   -> list_packages
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(catalog::list_packages))
}
