//! Handlers for course enrollment.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use mentora_core::error::CoreError;
use mentora_db::models::enrollment::EnrollmentView;
use mentora_db::repositories::EnrollmentRepo;
use mentora_events::{ChangeKind, StoreChange, WatchedCollection};

use crate::error::AppResult;
use crate::handlers::catalog::resolve_access;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/courses/{course_id}/enroll
///
/// Idempotent: a second enroll for the same course returns the existing
/// enrollment untouched. Requires an active package granting the course.
pub async fn enroll(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let access = resolve_access(&state, auth.student_id, &course_id).await?;
    if !access.allowed {
        return Err(CoreError::Forbidden(
            "No active package grants access to this course".into(),
        )
        .into());
    }

    let (enrollment, created) = EnrollmentRepo::enroll(&state.pool, auth.student_id, &course_id).await?;

    if created {
        state.change_bus.publish(StoreChange::new(
            WatchedCollection::Enrollments,
            ChangeKind::Added,
        ));
        tracing::info!(
            student_id = auth.student_id,
            course_id = %course_id,
            "Student enrolled",
        );
    }

    Ok(Json(DataResponse {
        data: EnrollmentView::from(enrollment),
    }))
}

/// GET /api/v1/user/enrollments
///
/// The caller's enrollments, oldest first.
pub async fn list_my_enrollments(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let enrollments = EnrollmentRepo::list_for_student(&state.pool, auth.student_id).await?;
    let views: Vec<EnrollmentView> = enrollments.into_iter().map(EnrollmentView::from).collect();
    Ok(Json(DataResponse { data: views }))
}
