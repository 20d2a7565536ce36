//! Periodic WebSocket heartbeat.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::ws::manager::WsManager;

/// Interval between heartbeat pings.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Spawn the heartbeat task: pings every connection on a fixed interval.
///
/// The task runs until aborted during shutdown.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);
        loop {
            interval.tick().await;
            ws_manager.ping_all().await;
        }
    })
}
