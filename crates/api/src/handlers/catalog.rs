//! Handlers for the package catalog and course access checks.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use mentora_core::catalog::{CourseSet, Package, PackageDuration};
use mentora_core::entitlement::EntitlementEvaluator;
use mentora_core::types::{DbId, EpochMillis};
use mentora_db::models::transaction::Transaction;
use mentora_db::repositories::TransactionRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Wire views
// ---------------------------------------------------------------------------

/// Wire view of a catalog package.
///
/// `courses` is either the string `"all"` or an array of course ids;
/// `durationDays` is either the string `"lifetime"` or a day count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageView {
    pub id: String,
    pub name: String,
    /// Price in integer cents.
    pub price: i64,
    pub courses: serde_json::Value,
    pub duration_days: serde_json::Value,
}

impl From<&Package> for PackageView {
    fn from(package: &Package) -> Self {
        Self {
            id: package.id.clone(),
            name: package.name.clone(),
            price: package.price_cents,
            courses: match &package.courses {
                CourseSet::All => serde_json::json!("all"),
                CourseSet::Only(ids) => serde_json::json!(ids),
            },
            duration_days: match package.duration {
                PackageDuration::Lifetime => serde_json::json!("lifetime"),
                PackageDuration::Days(days) => serde_json::json!(days),
            },
        }
    }
}

/// Wire view of an access decision.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessView {
    pub allowed: bool,
    /// The resolved active package, if any.
    pub package_id: Option<String>,
    /// Expiry of the resolved purchase in epoch millis; `None` for
    /// lifetime packages or when no package is active.
    pub expires_at: Option<EpochMillis>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/packages
///
/// The full catalog, in catalog order. Public.
pub async fn list_packages(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let packages: Vec<PackageView> = state.catalog.all().iter().map(PackageView::from).collect();
    Ok(Json(DataResponse { data: packages }))
}

/// GET /api/v1/courses/{course_id}/access
///
/// Whether the caller's active package grants access to the course.
pub async fn course_access(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let access = resolve_access(&state, auth.student_id, &course_id).await?;
    Ok(Json(DataResponse { data: access }))
}

/// Resolve the caller's access to a course from their purchase history.
///
/// Purchases are evaluated most-recent-first (the repository's order);
/// the first qualifying purchase wins.
pub(crate) async fn resolve_access(
    state: &AppState,
    student_id: DbId,
    course_id: &str,
) -> AppResult<AccessView> {
    let transactions = TransactionRepo::list_for_student(&state.pool, student_id).await?;
    let purchases: Vec<_> = transactions.iter().map(Transaction::to_purchase_record).collect();

    let evaluator = EntitlementEvaluator::new(&state.catalog);
    let now = Utc::now().timestamp_millis();

    let resolved = evaluator.resolve_active_purchase(&purchases, now);
    let allowed = evaluator.has_access(resolved.map(|(pkg, _)| pkg.id.as_str()), course_id);

    Ok(AccessView {
        allowed,
        package_id: resolved.map(|(pkg, _)| pkg.id.clone()),
        expires_at: resolved
            .and_then(|(pkg, purchase)| evaluator.expires_at(purchase.purchased_at, &pkg.id)),
    })
}
