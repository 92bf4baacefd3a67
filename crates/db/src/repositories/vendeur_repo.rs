//! Repository for the `vendeurs` table.

use sqlx::PgPool;
use yam_core::types::DbId;

use crate::models::vendeur::{CreateVendeur, UpdateVendeur, Vendeur};

const COLUMNS: &str = "id, nom, prenom, societe, email, telephone, created_at, updated_at";

/// Provides CRUD operations for vendeurs.
pub struct VendeurRepo;

impl VendeurRepo {
    pub async fn create(pool: &PgPool, input: &CreateVendeur) -> Result<Vendeur, sqlx::Error> {
        let query = format!(
            "INSERT INTO vendeurs (nom, prenom, societe, email, telephone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendeur>(&query)
            .bind(&input.nom)
            .bind(&input.prenom)
            .bind(&input.societe)
            .bind(&input.email)
            .bind(&input.telephone)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vendeur>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendeurs WHERE id = $1");
        sqlx::query_as::<_, Vendeur>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Vendeur>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendeurs ORDER BY nom, id");
        sqlx::query_as::<_, Vendeur>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVendeur,
    ) -> Result<Option<Vendeur>, sqlx::Error> {
        let query = format!(
            "UPDATE vendeurs SET
                nom = COALESCE($2, nom),
                prenom = COALESCE($3, prenom),
                societe = COALESCE($4, societe),
                email = COALESCE($5, email),
                telephone = COALESCE($6, telephone)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendeur>(&query)
            .bind(id)
            .bind(&input.nom)
            .bind(&input.prenom)
            .bind(&input.societe)
            .bind(&input.email)
            .bind(&input.telephone)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vendeurs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
