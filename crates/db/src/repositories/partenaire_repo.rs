//! Repository for the `partenaires` table.

use sqlx::PgPool;
use yam_core::types::DbId;

use crate::models::partenaire::{CreatePartenaire, Partenaire, UpdatePartenaire};

const COLUMNS: &str =
    "id, nom, societe, email, telephone, commission_bps, created_at, updated_at";

/// Provides CRUD operations for partenaires.
pub struct PartenaireRepo;

impl PartenaireRepo {
    /// Insert a new partner. `commission_bps` defaults to 0.
    pub async fn create(pool: &PgPool, input: &CreatePartenaire) -> Result<Partenaire, sqlx::Error> {
        let query = format!(
            "INSERT INTO partenaires (nom, societe, email, telephone, commission_bps)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partenaire>(&query)
            .bind(&input.nom)
            .bind(&input.societe)
            .bind(&input.email)
            .bind(&input.telephone)
            .bind(input.commission_bps)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Partenaire>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partenaires WHERE id = $1");
        sqlx::query_as::<_, Partenaire>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Partenaire>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partenaires ORDER BY nom, id");
        sqlx::query_as::<_, Partenaire>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePartenaire,
    ) -> Result<Option<Partenaire>, sqlx::Error> {
        let query = format!(
            "UPDATE partenaires SET
                nom = COALESCE($2, nom),
                societe = COALESCE($3, societe),
                email = COALESCE($4, email),
                telephone = COALESCE($5, telephone),
                commission_bps = COALESCE($6, commission_bps)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partenaire>(&query)
            .bind(id)
            .bind(&input.nom)
            .bind(&input.societe)
            .bind(&input.email)
            .bind(&input.telephone)
            .bind(input.commission_bps)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM partenaires WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
