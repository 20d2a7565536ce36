//! WebSocket infrastructure: connection manager, upgrade handler,
//! heartbeat, and the projection push task.

pub mod handler;
pub mod heartbeat;
pub mod manager;
pub mod push;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use push::start_metrics_push;
