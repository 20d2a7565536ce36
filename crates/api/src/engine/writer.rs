//! Single-writer persistence task for accepted playback samples.
//!
//! All samples funnel through one mpsc consumer, so the dashboard's
//! read-modify-write of the weekday array is serialized in-process and
//! concurrent sessions cannot lose bucket updates to each other.
//!
//! Persistence failures are logged and dropped: every sample carries
//! absolute playback state, so the next accepted sample repairs the gap.

use std::sync::Arc;

use mentora_core::types::DbId;
use mentora_db::repositories::{DashboardRepo, EnrollmentRepo};
use mentora_db::DbPool;
use mentora_events::{ChangeBus, ChangeKind, StoreChange, WatchedCollection};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// An accepted progress sample queued for persistence.
#[derive(Debug, Clone)]
pub struct ProgressSample {
    pub student_id: DbId,
    pub course_id: String,
    pub percent: i16,
    pub position_seconds: i64,
    pub seconds_watched: i64,
}

/// Background writer for playback samples.
pub struct SampleWriter;

impl SampleWriter {
    /// Spawn the writer task.
    ///
    /// Returns the sample sender and the task handle. The task drains the
    /// channel until every sender clone is dropped, then exits.
    pub fn spawn(
        pool: DbPool,
        bus: Arc<ChangeBus>,
    ) -> (mpsc::UnboundedSender<ProgressSample>, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(Self::run(pool, bus, rx));
        (tx, handle)
    }

    async fn run(pool: DbPool, bus: Arc<ChangeBus>, mut rx: mpsc::UnboundedReceiver<ProgressSample>) {
        while let Some(sample) = rx.recv().await {
            Self::persist(&pool, &bus, sample).await;
        }
        tracing::info!("Sample channel closed, sample writer shutting down");
    }

    /// Persist one sample: progress update, then dashboard aggregation.
    async fn persist(pool: &DbPool, bus: &ChangeBus, sample: ProgressSample) {
        if let Err(e) = EnrollmentRepo::update_progress(
            pool,
            sample.student_id,
            &sample.course_id,
            sample.percent,
            sample.position_seconds,
        )
        .await
        {
            tracing::warn!(
                student_id = sample.student_id,
                course_id = %sample.course_id,
                error = %e,
                "Progress update dropped",
            );
            return;
        }

        match DashboardRepo::apply_sample(
            pool,
            sample.student_id,
            &sample.course_id,
            sample.percent,
            sample.seconds_watched,
        )
        .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(
                    student_id = sample.student_id,
                    "No dashboard row provisioned, sample not aggregated",
                );
            }
            Err(e) => {
                tracing::warn!(
                    student_id = sample.student_id,
                    error = %e,
                    "Dashboard aggregate write dropped",
                );
            }
        }

        bus.publish(StoreChange::new(
            WatchedCollection::Enrollments,
            ChangeKind::Updated,
        ));
    }
}
