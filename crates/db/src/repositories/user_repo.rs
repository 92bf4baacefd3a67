//! Repository for the `users` and `profiles` tables.
//!
//! A user and its profile are always created together, so every read
//! joins both tables into a [`UserWithProfile`].

use sqlx::PgPool;
use yam_core::roles::{ROLE_ADMIN, ROLE_COMMERCIAL};
use yam_core::types::DbId;

use crate::models::user::{CreateUser, UserWithProfile};

/// Joined column list for `users u JOIN profiles p`.
const COLUMNS: &str = "u.id, u.email, u.password_hash, u.is_active, u.last_login_at, \
                       p.nom, p.prenom, p.role_custom, p.partenaire_id, p.acquereur_id, \
                       u.created_at";

const FROM: &str = "users u JOIN profiles p ON p.user_id = u.id";

/// Provides identity and profile operations.
pub struct UserRepo;

impl UserRepo {
    /// Create a login and its profile atomically. When the profile points
    /// at an acquéreur, that record's `user_id` is linked in the same
    /// transaction.
    ///
    /// Fails with `RowNotFound` if the referenced acquéreur does not exist,
    /// and with a `uq_users_email` violation on a duplicate email.
    pub async fn create_with_profile(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<UserWithProfile, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: DbId = sqlx::query_scalar(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO profiles (user_id, nom, prenom, role_custom, partenaire_id, acquereur_id)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user_id)
        .bind(&input.nom)
        .bind(&input.prenom)
        .bind(&input.role_custom)
        .bind(input.partenaire_id)
        .bind(input.acquereur_id)
        .execute(&mut *tx)
        .await?;

        if let Some(acquereur_id) = input.acquereur_id {
            let linked = sqlx::query("UPDATE acquereurs SET user_id = $1 WHERE id = $2")
                .bind(user_id)
                .bind(acquereur_id)
                .execute(&mut *tx)
                .await?;
            if linked.rows_affected() == 0 {
                return Err(sqlx::Error::RowNotFound);
            }
        }

        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE u.id = $1");
        let user = sqlx::query_as::<_, UserWithProfile>(&query)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserWithProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE u.id = $1");
        sqlx::query_as::<_, UserWithProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up by email. Callers pass an already normalized address.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserWithProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE u.email = $1");
        sqlx::query_as::<_, UserWithProfile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// The user linked to an acquéreur, if that buyer has a portal login.
    pub async fn find_by_acquereur(
        pool: &PgPool,
        acquereur_id: DbId,
    ) -> Result<Option<UserWithProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE p.acquereur_id = $1");
        sqlx::query_as::<_, UserWithProfile>(&query)
            .bind(acquereur_id)
            .fetch_optional(pool)
            .await
    }

    /// Email addresses of active admin and commercial users.
    pub async fn list_staff_emails(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let query = format!(
            "SELECT u.email FROM {FROM}
             WHERE u.is_active AND p.role_custom IN ($1, $2)
             ORDER BY u.id"
        );
        sqlx::query_scalar(&query)
            .bind(ROLE_ADMIN)
            .bind(ROLE_COMMERCIAL)
            .fetch_all(pool)
            .await
    }

    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
