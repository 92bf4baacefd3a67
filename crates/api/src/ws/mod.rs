//! WebSocket push of change notifications.
//!
//! Browsers connect to `/api/v1/ws?token=<jwt>` and receive one JSON
//! [`ChangeEvent`](yam_events::ChangeEvent) per write, so lists can refresh
//! without polling.

mod forwarder;
mod handler;
mod heartbeat;
pub mod manager;

pub use forwarder::start_change_forwarder;
pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
