//! Repository for the `lots` table.

use sqlx::PgPool;
use yam_core::types::DbId;

use crate::models::lot::{CreateLot, Lot, LotExportRow, LotFilter, UpdateLot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, residence_id, reference, type_lot, etage, surface_m2, prix_cents, \
                       statut, acquereur_id, partenaire_id, vendeur_id, created_at, updated_at";

/// Shared WHERE clause for [`LotFilter`], binding `$1..$3`.
const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR l.statut = $1)
               AND ($2::BIGINT IS NULL OR l.residence_id = $2)
               AND ($3::BIGINT IS NULL OR l.partenaire_id = $3)";

/// Provides CRUD operations, filtering and export for lots.
pub struct LotRepo;

impl LotRepo {
    /// Insert a new lot. `type_lot` defaults to `appartement`, `statut` to `disponible`.
    pub async fn create(pool: &PgPool, input: &CreateLot) -> Result<Lot, sqlx::Error> {
        let query = format!(
            "INSERT INTO lots (residence_id, reference, type_lot, etage, surface_m2, prix_cents, statut, vendeur_id)
             VALUES ($1, $2, COALESCE($3, 'appartement'), $4, $5, $6, COALESCE($7, 'disponible'), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lot>(&query)
            .bind(input.residence_id)
            .bind(&input.reference)
            .bind(&input.type_lot)
            .bind(input.etage)
            .bind(input.surface_m2)
            .bind(input.prix_cents)
            .bind(&input.statut)
            .bind(input.vendeur_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lots WHERE id = $1");
        sqlx::query_as::<_, Lot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List lots matching `filter`, ordered by residence then reference.
    pub async fn list_filtered(pool: &PgPool, filter: &LotFilter) -> Result<Vec<Lot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lots l
             WHERE {FILTER_CLAUSE}
             ORDER BY l.residence_id, l.reference"
        );
        sqlx::query_as::<_, Lot>(&query)
            .bind(&filter.statut)
            .bind(filter.residence_id)
            .bind(filter.partenaire_id)
            .fetch_all(pool)
            .await
    }

    /// Update a lot. Only non-`None` fields in `input` are applied; an
    /// assignment id of `Some(None)` clears it.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLot,
    ) -> Result<Option<Lot>, sqlx::Error> {
        let query = format!(
            "UPDATE lots SET
                reference = COALESCE($2, reference),
                type_lot = COALESCE($3, type_lot),
                etage = COALESCE($4, etage),
                surface_m2 = COALESCE($5, surface_m2),
                prix_cents = COALESCE($6, prix_cents),
                statut = COALESCE($7, statut),
                acquereur_id = CASE WHEN $8 THEN $9 ELSE acquereur_id END,
                partenaire_id = CASE WHEN $10 THEN $11 ELSE partenaire_id END,
                vendeur_id = CASE WHEN $12 THEN $13 ELSE vendeur_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lot>(&query)
            .bind(id)
            .bind(&input.reference)
            .bind(&input.type_lot)
            .bind(input.etage)
            .bind(input.surface_m2)
            .bind(input.prix_cents)
            .bind(&input.statut)
            .bind(input.acquereur_id.is_some())
            .bind(input.acquereur_id.flatten())
            .bind(input.partenaire_id.is_some())
            .bind(input.partenaire_id.flatten())
            .bind(input.vendeur_id.is_some())
            .bind(input.vendeur_id.flatten())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lots assigned to a buyer, used by the buyer portal.
    pub async fn list_for_acquereur(
        pool: &PgPool,
        acquereur_id: DbId,
    ) -> Result<Vec<Lot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lots WHERE acquereur_id = $1 ORDER BY residence_id, reference"
        );
        sqlx::query_as::<_, Lot>(&query)
            .bind(acquereur_id)
            .fetch_all(pool)
            .await
    }

    /// Lots joined with residence, buyer and partner names for export.
    pub async fn export_rows(
        pool: &PgPool,
        filter: &LotFilter,
    ) -> Result<Vec<LotExportRow>, sqlx::Error> {
        let query = format!(
            "SELECT l.id, l.reference, l.type_lot, l.etage, l.surface_m2, l.prix_cents, l.statut,
                    l.residence_id, r.nom AS residence_nom, r.ville AS residence_ville,
                    l.acquereur_id,
                    CASE WHEN a.id IS NULL THEN NULL ELSE a.prenom || ' ' || a.nom END AS acquereur_nom,
                    a.email AS acquereur_email,
                    l.partenaire_id, p.nom AS partenaire_nom,
                    l.updated_at
             FROM lots l
             JOIN residences r ON r.id = l.residence_id
             LEFT JOIN acquereurs a ON a.id = l.acquereur_id
             LEFT JOIN partenaires p ON p.id = l.partenaire_id
             WHERE {FILTER_CLAUSE}
             ORDER BY r.nom, l.reference"
        );
        sqlx::query_as::<_, LotExportRow>(&query)
            .bind(&filter.statut)
            .bind(filter.residence_id)
            .bind(filter.partenaire_id)
            .fetch_all(pool)
            .await
    }
}
