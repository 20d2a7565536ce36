//! Per-session playback sampler.
//!
//! The sampler is an explicit state object passed into and out of the
//! position-update path, rather than mutable state captured in media
//! callbacks, so the persistence gate can be unit-tested on its own.
//!
//! Display state (the computed percent) is recomputed on every position
//! update without throttling; only persistence is rate-limited.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum whole-second playback advance between persisted samples.
pub const SAVE_INTERVAL_SECONDS: i64 = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lifecycle phase of a playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerPhase {
    /// No media loaded (initial state, ended, unmounted, or media error).
    Idle,
    /// Receiving periodic position updates.
    Playing,
}

/// A position sample that cleared the persistence gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedSample {
    /// Percent complete at acceptance (0..=100).
    pub percent: i16,
    /// Whole-second playback position at acceptance.
    pub position_seconds: i64,
    /// Whole seconds of playback since the previous accepted sample.
    pub seconds_watched: i64,
}

/// Outcome of feeding one position update to the sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionOutcome {
    /// Display percent, updated on every call.
    pub percent: i16,
    /// Present only when the persistence gate cleared.
    pub sample: Option<AcceptedSample>,
}

// ---------------------------------------------------------------------------
// PlaybackSampler
// ---------------------------------------------------------------------------

/// State machine for one playback session.
#[derive(Debug)]
pub struct PlaybackSampler {
    phase: SamplerPhase,
    /// Whole-second position of the last persisted sample; the gate baseline.
    last_persisted_whole_second: i64,
    /// Stored resume position, consumed by the first metadata event only.
    pending_seek_seconds: Option<i64>,
}

impl PlaybackSampler {
    /// Start a session, optionally resuming from a previously stored
    /// position.
    ///
    /// A positive resume position becomes a one-shot seek request (see
    /// [`take_pending_seek`](Self::take_pending_seek)) and the persistence
    /// gate starts at that position so resuming does not trigger an
    /// immediate write.
    pub fn start(resume_position_seconds: i64) -> Self {
        let resume = resume_position_seconds.max(0);
        Self {
            phase: SamplerPhase::Playing,
            last_persisted_whole_second: resume,
            pending_seek_seconds: (resume > 0).then_some(resume),
        }
    }

    pub fn phase(&self) -> SamplerPhase {
        self.phase
    }

    /// Consume the one-shot resume seek, if any.
    ///
    /// Called when media metadata becomes available; subsequent metadata
    /// events within the same session return `None` and must not re-seek.
    pub fn take_pending_seek(&mut self) -> Option<i64> {
        self.pending_seek_seconds.take()
    }

    /// Feed a position update.
    ///
    /// Always returns the freshly computed percent. When the whole-second
    /// position has advanced at least [`SAVE_INTERVAL_SECONDS`] past the
    /// last persisted sample, the gate is advanced *before* the sample is
    /// handed out, so a slow write or a burst of updates cannot double-emit.
    pub fn on_position(&mut self, position_seconds: f64, duration_seconds: f64) -> PositionOutcome {
        let percent = percent_complete(position_seconds, duration_seconds);

        if self.phase != SamplerPhase::Playing {
            return PositionOutcome { percent, sample: None };
        }

        let whole = position_seconds.max(0.0).floor() as i64;
        let seconds_watched = whole - self.last_persisted_whole_second;
        if seconds_watched < SAVE_INTERVAL_SECONDS {
            return PositionOutcome { percent, sample: None };
        }

        self.last_persisted_whole_second = whole;
        PositionOutcome {
            percent,
            sample: Some(AcceptedSample {
                percent,
                position_seconds: whole,
                seconds_watched,
            }),
        }
    }

    /// Media ended or the session was unmounted.
    pub fn stop(&mut self) {
        self.phase = SamplerPhase::Idle;
        self.pending_seek_seconds = None;
    }

    /// Media failed to load. No persistence side effect occurs.
    pub fn on_media_error(&mut self) {
        self.stop();
    }
}

/// `floor(min(position / duration, 1.0) * 100)`, clamped to `0..=100`.
///
/// Non-positive durations (metadata not yet known) report zero.
pub fn percent_complete(position_seconds: f64, duration_seconds: f64) -> i16 {
    if duration_seconds <= 0.0 {
        return 0;
    }
    let ratio = (position_seconds / duration_seconds).clamp(0.0, 1.0);
    (ratio * 100.0).floor() as i16
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
