//! Repository for the `partners` table.

use sqlx::PgPool;

use crate::models::partner::{NewPartner, Partner};

/// Column list for `partners` queries.
const COLUMNS: &str = "id, name, code, commission_rate_pct, created_at";

/// Read operations over referral partners, plus creation for provisioning.
pub struct PartnerRepo;

impl PartnerRepo {
    /// Insert a partner row.
    pub async fn create(pool: &PgPool, input: &NewPartner) -> Result<Partner, sqlx::Error> {
        let query = format!(
            "INSERT INTO partners (name, code, commission_rate_pct) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.commission_rate_pct)
            .fetch_one(pool)
            .await
    }

    /// Full partner collection, for the metric projection.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Partner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partners ORDER BY id");
        sqlx::query_as::<_, Partner>(&query).fetch_all(pool).await
    }
}
