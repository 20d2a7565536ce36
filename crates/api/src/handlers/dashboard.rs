//! Handler for the student dashboard aggregate.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mentora_core::error::CoreError;
use mentora_db::models::dashboard::DashboardView;
use mentora_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/user/dashboard
///
/// The caller's rollup statistics. The row is provisioned with the
/// account; a missing row is a 404, not something created here.
pub async fn get_dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let dashboard = DashboardRepo::find_by_student(&state.pool, auth.student_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "dashboard",
            key: auth.student_id.to_string(),
        })?;

    Ok(Json(DataResponse {
        data: DashboardView::from(dashboard),
    }))
}
