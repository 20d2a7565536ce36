//! Repository for the `transactions` table.

use mentora_core::types::DbId;
use sqlx::PgPool;

use crate::models::transaction::{NewTransaction, Transaction};

/// Column list for `transactions` queries.
const COLUMNS: &str = "id, student_id, package_id, amount_cents, status, purchased_at, expires_at";

/// Read operations over purchase transactions, plus creation for checkout
/// hooks and test fixtures.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Insert a transaction row.
    pub async fn create(pool: &PgPool, input: &NewTransaction) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions (student_id, package_id, amount_cents, status, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(input.student_id)
            .bind(&input.package_id)
            .bind(input.amount_cents)
            .bind(&input.status)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// A student's transactions, most recent first.
    ///
    /// This is the order entitlement resolution relies on: the first
    /// qualifying purchase wins.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions \
             WHERE student_id = $1 \
             ORDER BY purchased_at DESC"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Full transaction collection, for the metric projection.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transactions ORDER BY purchased_at DESC");
        sqlx::query_as::<_, Transaction>(&query).fetch_all(pool).await
    }
}
