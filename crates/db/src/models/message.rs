//! Conversation message model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yam_core::messaging::MessageOwner;
use yam_core::types::{DbId, Timestamp};

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    /// Exactly one of `acquereur_id` / `partenaire_id` is set.
    pub acquereur_id: Option<DbId>,
    pub partenaire_id: Option<DbId>,
    /// `staff`, `acquereur` or `partenaire`.
    pub sender_type: String,
    pub sender_user_id: Option<DbId>,
    pub body: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Message {
    /// The conversation this message belongs to.
    pub fn owner(&self) -> Option<MessageOwner> {
        MessageOwner::from_columns(self.acquereur_id, self.partenaire_id)
    }
}

/// Request body for sending a message. The sender is derived from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessage {
    pub body: String,
}
