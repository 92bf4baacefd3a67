//! Repository for the `acquereurs` table.

use sqlx::PgPool;
use yam_core::types::DbId;

use crate::models::acquereur::{Acquereur, CreateAcquereur, UpdateAcquereur};

const COLUMNS: &str = "id, nom, prenom, email, telephone, date_naissance, partenaire_id, \
                       user_id, created_at, updated_at";

/// Provides CRUD operations for acquéreurs, plus the birthday lookup.
pub struct AcquereurRepo;

impl AcquereurRepo {
    pub async fn create(pool: &PgPool, input: &CreateAcquereur) -> Result<Acquereur, sqlx::Error> {
        let query = format!(
            "INSERT INTO acquereurs (nom, prenom, email, telephone, date_naissance, partenaire_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Acquereur>(&query)
            .bind(&input.nom)
            .bind(&input.prenom)
            .bind(&input.email)
            .bind(&input.telephone)
            .bind(input.date_naissance)
            .bind(input.partenaire_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Acquereur>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM acquereurs WHERE id = $1");
        sqlx::query_as::<_, Acquereur>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List buyers, optionally restricted to those brought by one partner.
    pub async fn list(
        pool: &PgPool,
        partenaire_id: Option<DbId>,
    ) -> Result<Vec<Acquereur>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM acquereurs
             WHERE ($1::BIGINT IS NULL OR partenaire_id = $1)
             ORDER BY nom, prenom, id"
        );
        sqlx::query_as::<_, Acquereur>(&query)
            .bind(partenaire_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAcquereur,
    ) -> Result<Option<Acquereur>, sqlx::Error> {
        let query = format!(
            "UPDATE acquereurs SET
                nom = COALESCE($2, nom),
                prenom = COALESCE($3, prenom),
                email = COALESCE($4, email),
                telephone = COALESCE($5, telephone),
                date_naissance = COALESCE($6, date_naissance),
                partenaire_id = COALESCE($7, partenaire_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Acquereur>(&query)
            .bind(id)
            .bind(&input.nom)
            .bind(&input.prenom)
            .bind(&input.email)
            .bind(&input.telephone)
            .bind(input.date_naissance)
            .bind(input.partenaire_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM acquereurs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Buyers with an email address whose birth (month, day) is one of `keys`.
    pub async fn list_birthdays(
        pool: &PgPool,
        keys: &[(u32, u32)],
    ) -> Result<Vec<Acquereur>, sqlx::Error> {
        let months: Vec<i32> = keys.iter().map(|(m, _)| *m as i32).collect();
        let days: Vec<i32> = keys.iter().map(|(_, d)| *d as i32).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM acquereurs
             WHERE email IS NOT NULL
               AND date_naissance IS NOT NULL
               AND (EXTRACT(MONTH FROM date_naissance)::INT, EXTRACT(DAY FROM date_naissance)::INT)
                   IN (SELECT m, d FROM UNNEST($1::INT[], $2::INT[]) AS k(m, d))
             ORDER BY id"
        );
        sqlx::query_as::<_, Acquereur>(&query)
            .bind(&months)
            .bind(&days)
            .fetch_all(pool)
            .await
    }
}
