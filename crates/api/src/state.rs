use std::sync::Arc;

use mentora_core::catalog::PackageCatalog;
use mentora_events::{AdminSnapshot, ChangeBus};
use tokio::sync::{mpsc, watch};

use crate::config::ServerConfig;
use crate::engine::{PlaybackSessions, ProgressSample};
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mentora_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Immutable package catalog.
    pub catalog: Arc<PackageCatalog>,
    /// WebSocket connection manager (admin clients).
    pub ws_manager: Arc<WsManager>,
    /// Store change notifications feeding the metric projection.
    pub change_bus: Arc<ChangeBus>,
    /// Active playback sessions.
    pub sessions: Arc<PlaybackSessions>,
    /// Sender half of the sample writer queue.
    pub sample_tx: mpsc::UnboundedSender<ProgressSample>,
    /// Latest admin metrics snapshot from the projection.
    pub metrics: watch::Receiver<AdminSnapshot>,
}
