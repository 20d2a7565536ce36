//! Handlers for the admin intelligence dashboard.
//!
//! Snapshot reads come from the metric projection; the WebSocket push
//! keeps connected admin clients current between polls.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mentora_db::models::payout::Payout;
use mentora_db::repositories::PayoutRepo;
use mentora_events::{summarize_payouts, PayoutSummary};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Pending payouts with their settlement total.
#[derive(Debug, Serialize)]
pub struct PendingPayoutsView {
    pub payouts: Vec<Payout>,
    pub summary: PayoutSummary,
}

/// GET /api/v1/admin/metrics
///
/// The latest projection snapshot (revenue / enrollment / student splits
/// and pending payout totals).
pub async fn metrics(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.metrics.borrow().clone();
    Ok(Json(DataResponse { data: snapshot }))
}

/// GET /api/v1/admin/payouts/pending
///
/// Payouts awaiting settlement, oldest first.
pub async fn pending_payouts(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let payouts = PayoutRepo::list_pending(&state.pool).await?;
    let summary = summarize_payouts(&payouts);

    Ok(Json(DataResponse {
        data: PendingPayoutsView { payouts, summary },
    }))
}
