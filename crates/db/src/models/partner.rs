//! Referral partner entity model.

use mentora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `partners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Partner {
    pub id: DbId,
    pub name: String,
    /// Referral code handed out in partner links.
    pub code: String,
    /// Commission on partner-sourced revenue, integer percent (0..=100).
    pub commission_rate_pct: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a partner.
#[derive(Debug, Deserialize)]
pub struct NewPartner {
    pub name: String,
    pub code: String,
    pub commission_rate_pct: i32,
}
