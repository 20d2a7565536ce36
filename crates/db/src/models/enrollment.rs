//! Enrollment entity model: per-(student, course) playback progress.

use mentora_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `enrollments` table.
///
/// Created once per (student, course); never deleted in normal operation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub student_id: DbId,
    pub course_id: String,
    /// 0..=100.
    pub progress_percent: i16,
    /// Derived: `progress_percent >= 100`.
    pub completed: bool,
    pub enrolled_at: Timestamp,
    pub last_active_at: Timestamp,
    pub last_playback_position_seconds: i64,
}

/// Wire view preserving the stored-document key contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentView {
    pub course_id: String,
    pub progress_percent: i16,
    pub completed: bool,
    pub enrolled_at: Timestamp,
    pub last_active_at: Timestamp,
    pub last_playback_position_seconds: i64,
}

impl From<Enrollment> for EnrollmentView {
    fn from(row: Enrollment) -> Self {
        Self {
            course_id: row.course_id,
            progress_percent: row.progress_percent,
            completed: row.completed,
            enrolled_at: row.enrolled_at,
            last_active_at: row.last_active_at,
            last_playback_position_seconds: row.last_playback_position_seconds,
        }
    }
}
