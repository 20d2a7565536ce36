//! Mentora change bus and realtime metric projection.
//!
//! This crate provides the building blocks for the admin intelligence
//! dashboard:
//!
//! - [`ChangeBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, standing in for the store's
//!   change-notification primitive.
//! - [`StoreChange`] — the change envelope for watched collections.
//! - [`MetricsProjection`] — background service that materializes the full
//!   set of every watched collection and recomputes admin metrics from
//!   scratch on each change.
//! - [`metrics`] — pure aggregation over full collection snapshots.

pub mod bus;
pub mod metrics;
pub mod projection;

pub use bus::{ChangeBus, ChangeKind, StoreChange, WatchedCollection};
pub use metrics::{compute_metrics, summarize_payouts, AdminSnapshot, Metrics, PayoutSummary};
pub use projection::{MetricsProjection, ProjectionHandle};
