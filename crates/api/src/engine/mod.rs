//! Playback-session machinery: the in-process session registry and the
//! single-writer task that persists accepted samples.

pub mod sessions;
pub mod writer;

pub use sessions::PlaybackSessions;
pub use writer::{ProgressSample, SampleWriter};
