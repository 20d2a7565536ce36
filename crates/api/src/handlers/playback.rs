//! Handlers for playback sessions and progress ticks.
//!
//! The client reports raw media state (position, duration, lifecycle
//! events); the server-side sampler decides what gets persisted. Accepted
//! samples are handed to the sample writer fire-and-forget: a slow or
//! failed write never blocks the tick response.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mentora_core::error::CoreError;
use mentora_db::repositories::EnrollmentRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::ProgressSample;
use crate::error::{AppError, AppResult};
use crate::handlers::catalog::resolve_access;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Response for `POST /playback/start`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartPlaybackView {
    /// One-shot seek target for the media element; `null` when playback
    /// starts from the beginning.
    pub resume_position_seconds: Option<i64>,
}

/// Request body for a position tick.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PositionRequest {
    #[validate(range(min = 0.0))]
    pub position_seconds: f64,
    /// Media duration; must be known (positive) before ticks are sent.
    #[validate(range(min = 0.001))]
    pub duration_seconds: f64,
}

/// Response for a position tick.
#[derive(Debug, Serialize)]
pub struct TickView {
    /// Display percent, recomputed on every tick.
    pub percent: i16,
    /// Whether this tick cleared the persistence gate.
    pub persisted: bool,
}

/// Query params for `DELETE /playback`.
#[derive(Debug, Deserialize)]
pub struct EndPlaybackQuery {
    /// Why the session ended: `ended`, `unmount`, or `error`.
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{course_id}/playback/start
///
/// Opens a playback session. Requires access and an existing enrollment;
/// returns the stored resume position, if any. Restarting replaces the
/// previous session.
pub async fn start_playback(
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

    let enrollment = EnrollmentRepo::find(&state.pool, auth.student_id, &course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "enrollment",
            key: course_id.clone(),
        })?;

    let seek = state
        .sessions
        .start(
            auth.student_id,
            &course_id,
            enrollment.last_playback_position_seconds,
        )
        .await;

    Ok(Json(DataResponse {
        data: StartPlaybackView {
            resume_position_seconds: seek,
        },
    }))
}

/// PUT /api/v1/courses/{course_id}/playback/position
///
/// Feed one media position update to the session. The response always
/// carries the freshly computed percent; `persisted` reports whether the
/// sample cleared the gate and was queued for the writer.
pub async fn playback_position(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(input): Json<PositionRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let outcome = state
        .sessions
        .on_position(
            auth.student_id,
            &course_id,
            input.position_seconds,
            input.duration_seconds,
        )
        .await
        .ok_or(CoreError::NotFound {
            entity: "playback session",
            key: course_id.clone(),
        })?;

    let persisted = outcome.sample.is_some();
    if let Some(sample) = outcome.sample {
        let sample = ProgressSample {
            student_id: auth.student_id,
            course_id: course_id.clone(),
            percent: sample.percent,
            position_seconds: sample.position_seconds,
            seconds_watched: sample.seconds_watched,
        };
        // Fire and forget; a closed channel only happens during shutdown.
        if state.sample_tx.send(sample).is_err() {
            tracing::warn!(
                student_id = auth.student_id,
                course_id = %course_id,
                "Sample writer unavailable, dropping sample",
            );
        }
    }

    Ok(Json(DataResponse {
        data: TickView {
            percent: outcome.percent,
            persisted,
        },
    }))
}

/// DELETE /api/v1/courses/{course_id}/playback
///
/// End the session (media ended, unmounted, or failed) and discard its
/// state. Idempotent: ending a session that does not exist is a 204.
pub async fn end_playback(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(query): Query<EndPlaybackQuery>,
) -> AppResult<StatusCode> {
    let existed = state.sessions.stop(auth.student_id, &course_id).await;

    if query.reason.as_deref() == Some("error") {
        tracing::warn!(
            student_id = auth.student_id,
            course_id = %course_id,
            "Playback session ended due to media error",
        );
    } else {
        tracing::debug!(
            student_id = auth.student_id,
            course_id = %course_id,
            existed,
            "Playback session ended",
        );
    }

    Ok(StatusCode::NO_CONTENT)
}
