use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use yam_core::roles::is_staff;
use yam_core::types::{DbId, Timestamp};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    pub user_id: DbId,
    pub role: String,
    pub sender: WsSender,
    pub connected_at: Timestamp,
}

/// Registry of live connections, shared behind an `Arc`.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection and return the receiver its writer task drains.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: DbId,
        role: String,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            role,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    pub async fn remove(&self, conn_id: &str) {
        if let Some(conn) = self.connections.write().await.remove(conn_id) {
            let secs = (chrono::Utc::now() - conn.connected_at).num_seconds();
            tracing::debug!(conn_id, user_id = conn.user_id, role = %conn.role, secs, "Connection removed");
        }
    }

    /// Send a message to every staff connection. Returns how many.
    ///
    /// Buyer and partner sockets never receive it. Closed channels are
    /// skipped; their reader loop removes them.
    pub async fn broadcast_to_staff(&self, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values().filter(|c| is_staff(&c.role)) {
            let _ = conn.sender.send(message.clone());
            count += 1;
        }
        count
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

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
    async fn staff_broadcast_skips_buyers_and_partners() {
        let manager = WsManager::new();
        let mut admin = manager.add("a".into(), 1, "admin".into()).await;
        let mut sales = manager.add("s".into(), 2, "commercial".into()).await;
        let mut buyer = manager.add("b".into(), 3, "acquereur".into()).await;
        let mut partner = manager.add("p".into(), 4, "partenaire".into()).await;

        let sent = manager.broadcast_to_staff(Message::Text("hello".into())).await;

        assert_eq!(sent, 2);
        assert!(matches!(admin.recv().await, Some(Message::Text(t)) if t.as_str() == "hello"));
        assert!(matches!(sales.recv().await, Some(Message::Text(t)) if t.as_str() == "hello"));
        assert!(buyer.try_recv().is_err());
        assert!(partner.try_recv().is_err());
    }

    #[tokio::test]
    async fn shutdown_closes_and_clears() {
        let manager = WsManager::new();
        let mut rx = manager.add("a".into(), 1, "admin".into()).await;
        manager.remove("missing").await;
        assert_eq!(manager.connection_count().await, 1);

        manager.shutdown_all().await;

        assert_eq!(manager.connection_count().await, 0);
        assert!(matches!(rx.recv().await, Some(Message::Close(None))));
    }
}
