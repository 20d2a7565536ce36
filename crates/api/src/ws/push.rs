//! Pushes projection snapshots to connected admin clients.

use std::sync::Arc;

use axum::extract::ws::Message;
use mentora_events::AdminSnapshot;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ws::manager::WsManager;

/// Message type tag for pushed metric snapshots.
pub const MSG_TYPE_METRICS_UPDATED: &str = "metrics.updated";

/// Spawn the push task: forwards every published [`AdminSnapshot`] to all
/// admin WebSocket connections.
///
/// Exits when the projection's watch channel closes (projection shutdown).
pub fn start_metrics_push(
    ws_manager: Arc<WsManager>,
    mut snapshots: watch::Receiver<AdminSnapshot>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            let payload = serde_json::json!({
                "type": MSG_TYPE_METRICS_UPDATED,
                "data": snapshot,
            });
            ws_manager
                .send_to_admins(Message::Text(payload.to_string().into()))
                .await;
        }
        tracing::info!("Projection channel closed, metrics push shutting down");
    })
}
