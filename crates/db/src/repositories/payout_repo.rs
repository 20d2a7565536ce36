//! Repository for the `payouts` table.

use sqlx::PgPool;

use crate::models::payout::{NewPayout, Payout, PAYOUT_STATUS_PENDING};

/// Column list for `payouts` queries.
const COLUMNS: &str = "id, partner_id, amount_cents, status, requested_at, paid_at";

/// Read operations over partner payouts, plus creation for test fixtures.
pub struct PayoutRepo;

impl PayoutRepo {
    /// Insert a pending payout request.
    pub async fn create(pool: &PgPool, input: &NewPayout) -> Result<Payout, sqlx::Error> {
        let query = format!(
            "INSERT INTO payouts (partner_id, amount_cents) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payout>(&query)
            .bind(input.partner_id)
            .bind(input.amount_cents)
            .fetch_one(pool)
            .await
    }

    /// Payouts awaiting settlement, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Payout>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payouts WHERE status = $1 ORDER BY requested_at"
        );
        sqlx::query_as::<_, Payout>(&query)
            .bind(PAYOUT_STATUS_PENDING)
            .fetch_all(pool)
            .await
    }
}
