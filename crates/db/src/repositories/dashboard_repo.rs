//! Repository for the `dashboards` table: the per-student aggregate.
//!
//! All writes here are partial merges of the affected columns. The weekday
//! activity array requires a read-modify-write (an array slot cannot be
//! atomically incremented); callers serialize those through the sample
//! writer task. The seconds total is incremented column-side in the same
//! UPDATE.

use chrono::Utc;
use mentora_core::activity::{self, DayActivity};
use mentora_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::Dashboard;

/// Column list for `dashboards` queries.
const COLUMNS: &str = "student_id, enrolled_courses_count, active_seconds_total, \
                       activity, current_course, last_active_at, updated_at, created_at";

/// Read and merge-write operations for the dashboard aggregate.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Point-read a student's dashboard row.
    pub async fn find_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Option<Dashboard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dashboards WHERE student_id = $1");
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// Create an empty dashboard row if none exists.
    ///
    /// Normally done by account provisioning; exposed for provisioning
    /// hooks and test fixtures.
    pub async fn provision(pool: &PgPool, student_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO dashboards (student_id, activity) \
             VALUES ($1, $2) \
             ON CONFLICT (student_id) DO NOTHING",
        )
        .bind(student_id)
        .bind(week_to_json(&activity::empty_week()))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Merge-write the enrolled-course count as the current number of
    /// enrollment rows.
    ///
    /// A student without a dashboard row is a no-op: provisioning is an
    /// external precondition, not something created here.
    pub async fn refresh_enrolled_count(pool: &PgPool, student_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE dashboards \
             SET enrolled_courses_count = \
                 (SELECT COUNT(*) FROM enrollments WHERE student_id = $1), \
                 updated_at = now() \
             WHERE student_id = $1",
        )
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fold one accepted playback sample into the aggregate.
    ///
    /// Read-modify-write: the current weekday array is read, the bucket for
    /// today (UTC) gains `seconds_watched` converted to hours, and only the
    /// affected columns are written back. `active_seconds_total` is
    /// incremented column-side so the scalar cannot lose updates even
    /// outside the writer task.
    ///
    /// Returns `false` without touching anything when the dashboard row has
    /// not been provisioned.
    pub async fn apply_sample(
        pool: &PgPool,
        student_id: DbId,
        course_id: &str,
        percent: i16,
        seconds_watched: i64,
    ) -> Result<bool, sqlx::Error> {
        let Some(row) = Self::find_by_student(pool, student_id).await? else {
            return Ok(false);
        };

        let mut week = parse_week(student_id, row.activity);
        let now = Utc::now();
        activity::add_seconds(&mut week, activity::day_index(now.date_naive()), seconds_watched);

        let current_course = serde_json::json!({
            "courseId": course_id,
            "progress": percent,
            "updatedAt": now,
        });

        sqlx::query(
            "UPDATE dashboards \
             SET activity = $2, \
                 active_seconds_total = active_seconds_total + $3, \
                 current_course = $4, \
                 last_active_at = $5, \
                 updated_at = $5 \
             WHERE student_id = $1",
        )
        .bind(student_id)
        .bind(week_to_json(&week))
        .bind(seconds_watched)
        .bind(current_course)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(true)
    }
}

/// Decode a stored weekday array, falling back to a fresh week when the
/// stored shape is unusable.
fn parse_week(student_id: DbId, stored: serde_json::Value) -> Vec<DayActivity> {
    match serde_json::from_value::<Vec<DayActivity>>(stored) {
        Ok(week) if week.len() == 7 => week,
        Ok(week) => {
            tracing::warn!(
                student_id,
                len = week.len(),
                "Stored activity week has wrong length, resetting"
            );
            activity::empty_week()
        }
        Err(e) => {
            tracing::warn!(student_id, error = %e, "Stored activity week is malformed, resetting");
            activity::empty_week()
        }
    }
}

/// Encode a weekday array with the stored-document keys.
fn week_to_json(week: &[DayActivity]) -> serde_json::Value {
    serde_json::Value::Array(
        week.iter()
            .map(|b| serde_json::json!({"day": b.day, "hours": b.hours}))
            .collect(),
    )
}
