//! Partner payout entity model.

use mentora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status value of a payout awaiting settlement.
pub const PAYOUT_STATUS_PENDING: &str = "pending";

/// A row from the `payouts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payout {
    pub id: DbId,
    pub partner_id: DbId,
    pub amount_cents: i64,
    pub status: String,
    pub requested_at: Timestamp,
    pub paid_at: Option<Timestamp>,
}

/// DTO for creating a payout request.
#[derive(Debug, Deserialize)]
pub struct NewPayout {
    pub partner_id: DbId,
    pub amount_cents: i64,
}
