use std::sync::Arc;

use yam_events::{ChangeEvent, EventBus, MailTransport};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: yam_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Change notifications pushed to browsers.
    pub event_bus: Arc<EventBus>,
    /// Outbound email. A log-only transport when SMTP is not configured.
    pub mailer: Arc<dyn MailTransport>,
}

impl AppState {
    /// Publish a change so connected clients refresh the affected table.
    pub fn notify(&self, event: ChangeEvent) {
        self.event_bus.publish(event);
    }
}
