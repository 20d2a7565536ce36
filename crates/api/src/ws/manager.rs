use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use mentora_core::types::{DbId, Timestamp};
use tokio::sync::{mpsc, RwLock};

use crate::middleware::auth::ROLE_ADMIN;

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Authenticated student ID.
    pub student_id: DbId,
    /// Role carried by the connection's token.
    pub role: String,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        student_id: DbId,
        role: String,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            student_id,
            role,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Send a message to every admin connection.
    ///
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up on their next receive loop iteration).
    /// Returns the number of connections the message was sent to.
    pub async fn send_to_admins(&self, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.role == ROLE_ADMIN {
                let _ = conn.sender.send(message.clone());
                count += 1;
            }
        }
        count
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn admin_broadcast_skips_student_connections() {
        let manager = WsManager::new();
        let mut admin_rx = manager.add("a".to_string(), 1, ROLE_ADMIN.to_string()).await;
        let mut student_rx = manager.add("s".to_string(), 2, "student".to_string()).await;

        let sent = manager
            .send_to_admins(Message::Text("hello".to_string().into()))
            .await;

        assert_eq!(sent, 1);
        assert!(admin_rx.try_recv().is_ok());
        assert!(student_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn shutdown_clears_all_connections() {
        let manager = WsManager::new();
        manager.add("a".to_string(), 1, ROLE_ADMIN.to_string()).await;
        assert_eq!(manager.connection_count().await, 1);

        manager.shutdown_all().await;
        assert_eq!(manager.connection_count().await, 0);
    }
}
