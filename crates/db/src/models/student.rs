//! Student entity model.

use mentora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
///
/// Students are provisioned by the external identity system; this service
/// only reads them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    /// Acquisition source. `Some` means the student came through a partner
    /// referral.
    pub partner_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a student (provisioning hooks and test fixtures).
#[derive(Debug, Deserialize)]
pub struct NewStudent {
    pub email: String,
    pub display_name: String,
    pub partner_id: Option<DbId>,
}
