//! Repository for the `password_reset_tokens` table.

use sqlx::PgPool;
use yam_core::types::{DbId, Timestamp};

use crate::models::password_reset::PasswordResetToken;

const COLUMNS: &str = "id, user_id, token_hash, expires_at, used_at, created_at";

/// Provides reset token issue and redemption.
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Store a new token hash for `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<PasswordResetToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<PasswordResetToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM password_reset_tokens WHERE token_hash = $1");
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Consume a token and set the user's new password hash atomically.
    ///
    /// Returns `false` (and changes nothing) if the token was already used
    /// or has expired by the time the transaction runs.
    pub async fn redeem(
        pool: &PgPool,
        token_id: DbId,
        user_id: DbId,
        new_password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let consumed = sqlx::query(
            "UPDATE password_reset_tokens SET used_at = NOW()
             WHERE id = $1 AND used_at IS NULL AND expires_at > NOW()",
        )
        .bind(token_id)
        .execute(&mut *tx)
        .await?;

        if consumed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(new_password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Delete tokens that expired or were used more than a day ago.
    pub async fn purge_stale(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM password_reset_tokens
             WHERE expires_at < NOW() - INTERVAL '1 day'
                OR used_at < NOW() - INTERVAL '1 day'",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
