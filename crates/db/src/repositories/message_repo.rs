//! Repository for the `messages` table.

use sqlx::PgPool;
use yam_core::messaging::{MessageOwner, SenderType};
use yam_core::types::DbId;

use crate::models::message::Message;

const COLUMNS: &str = "id, acquereur_id, partenaire_id, sender_type, sender_user_id, body, \
                       is_read, read_at, created_at";

/// Foreign-key column holding `owner`'s id.
fn owner_column(owner: MessageOwner) -> &'static str {
    match owner {
        MessageOwner::Acquereur(_) => "acquereur_id",
        MessageOwner::Partenaire(_) => "partenaire_id",
    }
}

/// Provides conversation message persistence.
pub struct MessageRepo;

impl MessageRepo {
    /// All messages of one conversation, oldest first.
    pub async fn list(pool: &PgPool, owner: MessageOwner) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE {} = $1
             ORDER BY created_at, id",
            owner_column(owner)
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(owner.id())
            .fetch_all(pool)
            .await
    }

    /// Append a message to a conversation. New messages start unread.
    ///
    /// Fails with a foreign key violation if the owner does not exist.
    pub async fn create(
        pool: &PgPool,
        owner: MessageOwner,
        sender: SenderType,
        sender_user_id: Option<DbId>,
        body: &str,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (acquereur_id, partenaire_id, sender_type, sender_user_id, body)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let (acquereur_id, partenaire_id) = match owner {
            MessageOwner::Acquereur(id) => (Some(id), None),
            MessageOwner::Partenaire(id) => (None, Some(id)),
        };
        sqlx::query_as::<_, Message>(&query)
            .bind(acquereur_id)
            .bind(partenaire_id)
            .bind(sender.as_str())
            .bind(sender_user_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip an unread message to read. Returns `false` if it was already read
    /// or does not exist.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = TRUE, read_at = NOW()
             WHERE id = $1 AND is_read = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count unread messages in a conversation written by `sender`.
    pub async fn count_unread(
        pool: &PgPool,
        owner: MessageOwner,
        sender: SenderType,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM messages
             WHERE {} = $1 AND sender_type = $2 AND is_read = FALSE",
            owner_column(owner)
        );
        sqlx::query_scalar(&query)
            .bind(owner.id())
            .bind(sender.as_str())
            .fetch_one(pool)
            .await
    }
}
