//! Registry of active playback sessions.
//!
//! One [`PlaybackSampler`] per (student, course), created by the playback
//! `start` endpoint and discarded when the session ends. Session state
//! lives only for the session's lifetime; nothing here survives a restart.

use std::collections::HashMap;

use mentora_core::sampler::{PlaybackSampler, PositionOutcome};
use mentora_core::types::DbId;
use tokio::sync::RwLock;

/// Thread-safe playback session registry.
///
/// Interior `RwLock`; designed to be wrapped in `Arc` and shared across
/// the application.
pub struct PlaybackSessions {
    sessions: RwLock<HashMap<(DbId, String), PlaybackSampler>>,
}

impl PlaybackSessions {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start (or restart) a session, resuming from a stored position.
    ///
    /// Returns the one-shot seek position for the media element, `None`
    /// when playback starts from the beginning. Restarting replaces any
    /// previous session for the same (student, course).
    pub async fn start(
        &self,
        student_id: DbId,
        course_id: &str,
        resume_position_seconds: i64,
    ) -> Option<i64> {
        let mut sampler = PlaybackSampler::start(resume_position_seconds);
        let seek = sampler.take_pending_seek();
        self.sessions
            .write()
            .await
            .insert((student_id, course_id.to_string()), sampler);
        seek
    }

    /// Feed a position update to the session, if one exists.
    pub async fn on_position(
        &self,
        student_id: DbId,
        course_id: &str,
        position_seconds: f64,
        duration_seconds: f64,
    ) -> Option<PositionOutcome> {
        self.sessions
            .write()
            .await
            .get_mut(&(student_id, course_id.to_string()))
            .map(|sampler| sampler.on_position(position_seconds, duration_seconds))
    }

    /// End a session (media ended, unmounted, or errored) and discard its
    /// state. Returns whether a session existed.
    pub async fn stop(&self, student_id: DbId, course_id: &str) -> bool {
        match self
            .sessions
            .write()
            .await
            .remove(&(student_id, course_id.to_string()))
        {
            Some(mut sampler) => {
                sampler.stop();
                true
            }
            None => false,
        }
    }

    /// The current number of active sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for PlaybackSessions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_returns_seek_only_when_resuming() {
        let sessions = PlaybackSessions::new();

        assert_eq!(sessions.start(1, "foundations", 0).await, None);
        assert_eq!(sessions.start(1, "foundations", 90).await, Some(90));
        assert_eq!(sessions.session_count().await, 1);
    }

    #[tokio::test]
    async fn position_updates_flow_through_the_session() {
        let sessions = PlaybackSessions::new();
        sessions.start(1, "foundations", 0).await;

        let outcome = sessions
            .on_position(1, "foundations", 5.0, 100.0)
            .await
            .expect("session exists");
        assert_eq!(outcome.percent, 5);
        assert!(outcome.sample.is_some());
    }

    #[tokio::test]
    async fn missing_session_yields_none() {
        let sessions = PlaybackSessions::new();
        assert!(sessions.on_position(1, "foundations", 5.0, 100.0).await.is_none());
    }

    #[tokio::test]
    async fn stop_discards_session_state() {
        let sessions = PlaybackSessions::new();
        sessions.start(1, "foundations", 0).await;

        assert!(sessions.stop(1, "foundations").await);
        assert!(!sessions.stop(1, "foundations").await);
        assert!(sessions.on_position(1, "foundations", 5.0, 100.0).await.is_none());
    }
}
