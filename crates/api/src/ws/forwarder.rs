use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast::error::RecvError;
use yam_events::EventBus;

use crate::ws::manager::WsManager;

/// Spawn a task relaying every bus event to staff WebSocket clients as JSON.
///
/// Exits when the bus is dropped.
pub fn start_change_forwarder(
    event_bus: &EventBus,
    ws_manager: Arc<WsManager>,
) -> tokio::task::JoinHandle<()> {
    let mut rx = event_bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(text) => {
                        ws_manager.broadcast_to_staff(Message::Text(text.into())).await;
                    }
                    Err(e) => tracing::error!(error = %e, "Failed to serialize change event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Change forwarder lagged, events dropped");
                }
                Err(RecvError::Closed) => {
                    tracing::info!("Event bus closed, change forwarder stopping");
                    break;
                }
            }
        }
    })
}
