//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Every successful write publishes a [`ChangeEvent`]; the WebSocket layer
//! subscribes and pushes them to connected browsers, which refetch the
//! affected table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use yam_core::types::DbId;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

/// A row-level change to one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Table name, e.g. `"lots"`.
    pub table: String,
    pub action: ChangeAction,
    /// Primary key of the changed row. `None` for bulk changes.
    pub id: Option<DbId>,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(table: impl Into<String>, action: ChangeAction, id: DbId) -> Self {
        Self {
            table: table.into(),
            action,
            id: Some(id),
            timestamp: Utc::now(),
        }
    }

    pub fn inserted(table: impl Into<String>, id: DbId) -> Self {
        Self::new(table, ChangeAction::Insert, id)
    }

    pub fn updated(table: impl Into<String>, id: DbId) -> Self {
        Self::new(table, ChangeAction::Update, id)
    }

    pub fn deleted(table: impl Into<String>, id: DbId) -> Self {
        Self::new(table, ChangeAction::Delete, id)
    }

    /// A change touching many rows at once (e.g. the option expiry sweep).
    pub fn bulk_update(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            action: ChangeAction::Update,
            id: None,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus, shared as `Arc<EventBus>`.
///
/// ```rust
/// use yam_events::bus::{ChangeEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ChangeEvent::inserted("lots", 1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unconsumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently when nobody listens.
    pub fn publish(&self, event: ChangeEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
