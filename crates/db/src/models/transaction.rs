//! Purchase transaction entity model.

use mentora_core::entitlement::{PurchaseRecord, PurchaseStatus};
use mentora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status value of a transaction that currently grants entitlement.
pub const TRANSACTION_STATUS_ACTIVE: &str = "active";

/// A row from the `transactions` table.
///
/// Written at checkout (external); read-only for this service. Entitlement
/// recomputes expiry from `purchased_at` and the catalog duration, so
/// `expires_at` is informational.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub student_id: DbId,
    pub package_id: String,
    pub amount_cents: i64,
    pub status: String,
    pub purchased_at: Timestamp,
    /// `None` = lifetime.
    pub expires_at: Option<Timestamp>,
}

impl Transaction {
    /// Project this row into the evaluator's purchase-record shape.
    pub fn to_purchase_record(&self) -> PurchaseRecord {
        PurchaseRecord {
            package_id: self.package_id.clone(),
            purchased_at: self.purchased_at.timestamp_millis(),
            status: PurchaseStatus::parse(&self.status),
        }
    }
}

/// DTO for creating a transaction (checkout hooks and test fixtures).
#[derive(Debug, Deserialize)]
pub struct NewTransaction {
    pub student_id: DbId,
    pub package_id: String,
    pub amount_cents: i64,
    pub status: String,
    pub expires_at: Option<Timestamp>,
}
