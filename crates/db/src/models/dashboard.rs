//! Dashboard aggregate entity model and wire views.

use mentora_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `dashboards` table: the per-student rollup.
///
/// Provisioned together with the student account (external); this service
/// only merge-updates individual columns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dashboard {
    pub student_id: DbId,
    pub enrolled_courses_count: i32,
    /// Whole seconds of playback, across all courses.
    pub active_seconds_total: i64,
    /// Fixed array of 7 `{"day", "hours"}` buckets, Monday first.
    pub activity: serde_json::Value,
    /// `{"courseId", "progress", "updatedAt"}` of the last touched course.
    pub current_course: Option<serde_json::Value>,
    pub last_active_at: Option<Timestamp>,
    pub updated_at: Timestamp,
    pub created_at: Timestamp,
}

/// Wire view preserving the stored-document shape: scalar counters nested
/// under `stats`, timestamps under `meta`.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub activity: serde_json::Value,
    #[serde(rename = "currentCourse")]
    pub current_course: Option<serde_json::Value>,
    pub meta: DashboardMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub enrolled_courses_count: i32,
    pub active_seconds_total: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    pub last_active_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl From<Dashboard> for DashboardView {
    fn from(row: Dashboard) -> Self {
        Self {
            stats: DashboardStats {
                enrolled_courses_count: row.enrolled_courses_count,
                active_seconds_total: row.active_seconds_total,
            },
            activity: row.activity,
            current_course: row.current_course,
            meta: DashboardMeta {
                last_active_at: row.last_active_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn view_nests_stats_and_meta_with_contract_keys() {
        let now = Utc::now();
        let view = DashboardView::from(Dashboard {
            student_id: 1,
            enrolled_courses_count: 2,
            active_seconds_total: 90,
            activity: serde_json::json!([]),
            current_course: Some(serde_json::json!({"courseId": "foundations"})),
            last_active_at: Some(now),
            updated_at: now,
            created_at: now,
        });

        let json = serde_json::to_value(&view).expect("serializes");
        assert_eq!(json["stats"]["enrolledCoursesCount"], 2);
        assert_eq!(json["stats"]["activeSecondsTotal"], 90);
        assert_eq!(json["currentCourse"]["courseId"], "foundations");
        assert!(json["meta"].get("lastActiveAt").is_some());
        assert!(json["meta"].get("updatedAt").is_some());
    }
}
