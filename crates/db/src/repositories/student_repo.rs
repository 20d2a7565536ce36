//! Repository for the `students` table.

use mentora_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{NewStudent, Student};

/// Column list for `students` queries.
const COLUMNS: &str = "id, email, display_name, partner_id, created_at";

/// Read operations over students, plus creation for provisioning hooks.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a student row.
    pub async fn create(pool: &PgPool, input: &NewStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (email, display_name, partner_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.email)
            .bind(&input.display_name)
            .bind(input.partner_id)
            .fetch_one(pool)
            .await
    }

    /// Find a student by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Full student collection, for the metric projection.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students ORDER BY id");
        sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
    }
}
