//! Repository for the `faqs` table.

use sqlx::PgPool;
use yam_core::types::DbId;

use crate::models::faq::{CreateFaq, Faq, UpdateFaq};

const COLUMNS: &str =
    "id, question, reponse, categorie, ordre, is_published, created_at, updated_at";

/// Provides CRUD operations for FAQ entries.
pub struct FaqRepo;

impl FaqRepo {
    pub async fn create(pool: &PgPool, input: &CreateFaq) -> Result<Faq, sqlx::Error> {
        let query = format!(
            "INSERT INTO faqs (question, reponse, categorie, ordre, is_published)
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(&input.question)
            .bind(&input.reponse)
            .bind(&input.categorie)
            .bind(input.ordre)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faqs WHERE id = $1");
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List entries in display order. Unpublished entries are included only
    /// when `include_unpublished` is set.
    pub async fn list(pool: &PgPool, include_unpublished: bool) -> Result<Vec<Faq>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faqs
             WHERE is_published OR $1
             ORDER BY categorie NULLS FIRST, ordre, id"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(include_unpublished)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFaq,
    ) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!(
            "UPDATE faqs SET
                question = COALESCE($2, question),
                reponse = COALESCE($3, reponse),
                categorie = COALESCE($4, categorie),
                ordre = COALESCE($5, ordre),
                is_published = COALESCE($6, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.reponse)
            .bind(&input.categorie)
            .bind(input.ordre)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
