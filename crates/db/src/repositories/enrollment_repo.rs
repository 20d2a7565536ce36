//! Repository for the `enrollments` table.

use mentora_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::Enrollment;
use crate::repositories::DashboardRepo;

/// Column list for `enrollments` queries.
const COLUMNS: &str = "id, student_id, course_id, progress_percent, completed, \
                       enrolled_at, last_active_at, last_playback_position_seconds";

/// Enrollment creation and progress updates.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Idempotent enroll: create the (student, course) row if absent.
    ///
    /// On first creation the row starts at zero progress and the student's
    /// dashboard `enrolled_courses_count` is merge-written as the current
    /// enrollment count. A repeated call returns the existing row untouched
    /// and leaves the count alone.
    ///
    /// Returns the row and whether it was created by this call.
    pub async fn enroll(
        pool: &PgPool,
        student_id: DbId,
        course_id: &str,
    ) -> Result<(Enrollment, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (student_id, course_id) \
             VALUES ($1, $2) \
             ON CONFLICT (student_id, course_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await?;

        if let Some(row) = inserted {
            DashboardRepo::refresh_enrolled_count(pool, student_id).await?;
            return Ok((row, true));
        }

        let existing = Self::find(pool, student_id, course_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok((existing, false))
    }

    /// Find one enrollment row.
    pub async fn find(
        pool: &PgPool,
        student_id: DbId,
        course_id: &str,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments WHERE student_id = $1 AND course_id = $2"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// Partial update of playback progress.
    ///
    /// Writes progress, position, `completed = (percent >= 100)` and
    /// `last_active_at`. Fails with [`sqlx::Error::RowNotFound`] when the
    /// enrollment does not exist: enroll and progress update are distinct
    /// operations and nothing is auto-created here.
    pub async fn update_progress(
        pool: &PgPool,
        student_id: DbId,
        course_id: &str,
        percent: i16,
        position_seconds: i64,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments \
             SET progress_percent = $3, \
                 last_playback_position_seconds = $4, \
                 completed = ($3 >= 100), \
                 last_active_at = now() \
             WHERE student_id = $1 AND course_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .bind(percent)
            .bind(position_seconds)
            .fetch_optional(pool)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// A student's enrollments, oldest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments WHERE student_id = $1 ORDER BY enrolled_at"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Full enrollment collection, for the metric projection.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments ORDER BY id");
        sqlx::query_as::<_, Enrollment>(&query).fetch_all(pool).await
    }
}
