//! Repository for the `residences` table.

use sqlx::PgPool;
use yam_core::types::DbId;

use crate::models::residence::{CreateResidence, Residence, UpdateResidence};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nom, adresse, ville, code_postal, description, \
                       date_livraison_prevue, created_at, updated_at";

/// Provides CRUD operations for residences.
pub struct ResidenceRepo;

impl ResidenceRepo {
    /// Insert a new residence, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateResidence) -> Result<Residence, sqlx::Error> {
        let query = format!(
            "INSERT INTO residences (nom, adresse, ville, code_postal, description, date_livraison_prevue)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Residence>(&query)
            .bind(&input.nom)
            .bind(&input.adresse)
            .bind(&input.ville)
            .bind(&input.code_postal)
            .bind(&input.description)
            .bind(input.date_livraison_prevue)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Residence>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM residences WHERE id = $1");
        sqlx::query_as::<_, Residence>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all residences alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Residence>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM residences ORDER BY nom, id");
        sqlx::query_as::<_, Residence>(&query).fetch_all(pool).await
    }

    /// Update a residence. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateResidence,
    ) -> Result<Option<Residence>, sqlx::Error> {
        let query = format!(
            "UPDATE residences SET
                nom = COALESCE($2, nom),
                adresse = COALESCE($3, adresse),
                ville = COALESCE($4, ville),
                code_postal = COALESCE($5, code_postal),
                description = COALESCE($6, description),
                date_livraison_prevue = COALESCE($7, date_livraison_prevue)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Residence>(&query)
            .bind(id)
            .bind(&input.nom)
            .bind(&input.adresse)
            .bind(&input.ville)
            .bind(&input.code_postal)
            .bind(&input.description)
            .bind(input.date_livraison_prevue)
            .fetch_optional(pool)
            .await
    }

    /// Delete a residence and, by cascade, its lots. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM residences WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
